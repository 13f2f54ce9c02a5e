use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Deserialize};

use super::{Discrete, Environment, Step, StepInfo};
use crate::error::{DeepQError, Result};

const MAP_4X4: [&str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

const MAP_8X8: [&str; 8] = [
    "SFFFFFFF",
    "FFFFFFFF",
    "FFFHFFFF",
    "FFFFFHFF",
    "FFFHFFFF",
    "FHHFFFHF",
    "FHFFHFHF",
    "FFFHFFFG",
];

const LEFT: usize = 0;
const DOWN: usize = 1;
const RIGHT: usize = 2;
const UP: usize = 3;
const NUM_ACTIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Start,
    Frozen,
    Hole,
    Goal,
}

impl Tile {
    fn parse(c: char) -> Option<Tile> {
        match c {
            'S' => Some(Tile::Start),
            'F' => Some(Tile::Frozen),
            'H' => Some(Tile::Hole),
            'G' => Some(Tile::Goal),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Tile::Hole | Tile::Goal)
    }
}

/// Which lake layout to build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LakeMap {
    #[serde(rename = "4x4")]
    FourByFour,
    #[serde(rename = "8x8")]
    EightByEight,
    /// Rows of `S`, `F`, `H`, `G` characters.
    #[serde(rename = "custom")]
    Custom(Vec<String>),
}

impl LakeMap {
    fn rows(&self) -> Vec<String> {
        match self {
            LakeMap::FourByFour => MAP_4X4.iter().map(|row| row.to_string()).collect(),
            LakeMap::EightByEight => MAP_8X8.iter().map(|row| row.to_string()).collect(),
            LakeMap::Custom(rows) => rows.clone(),
        }
    }

    /// Step limit gym registers for the layout: 100 for 4x4 and custom maps, 200 for 8x8.
    pub fn time_limit(&self) -> usize {
        match self {
            LakeMap::EightByEight => 200,
            LakeMap::FourByFour | LakeMap::Custom(_) => 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrozenLakeConfig {
    pub map: LakeMap,
    pub is_slippery: bool,
    /// Truncate episodes after this many steps. `None` falls back to
    /// [`LakeMap::time_limit`]; every episode is bounded either way.
    pub max_episode_steps: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for FrozenLakeConfig {
    fn default() -> Self {
        FrozenLakeConfig {
            map: LakeMap::FourByFour,
            is_slippery: true,
            max_episode_steps: None,
            seed: None,
        }
    }
}

/// The agent walks from `S` to `G` across frozen tiles without falling into a hole.
///
/// Reward is 1 on reaching the goal and 0 otherwise. On a slippery lake the
/// intended move happens with probability 1/3; otherwise the agent slides to
/// one of the two perpendicular directions.
#[derive(Debug, Clone)]
pub struct FrozenLake {
    tiles: Vec<Tile>,
    nrow: usize,
    ncol: usize,
    start: usize,
    is_slippery: bool,
    max_episode_steps: usize,
    position: usize,
    elapsed_steps: usize,
    finished: bool,
    rng: StdRng,
}

impl FrozenLake {
    pub fn new(config: &FrozenLakeConfig) -> Result<Self> {
        let rows = config.map.rows();
        let nrow = rows.len();
        let ncol = rows.first().map_or(0, |row| row.chars().count());
        if nrow == 0 || ncol == 0 {
            return Err(DeepQError::invalid_parameter("map", "lake must have at least one tile"));
        }

        let mut tiles = Vec::with_capacity(nrow * ncol);
        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != ncol {
                return Err(DeepQError::invalid_parameter(
                    "map".to_string(),
                    format!("row {} has {} tiles, expected {}", r, row.chars().count(), ncol),
                ));
            }
            for c in row.chars() {
                let tile = Tile::parse(c).ok_or_else(|| {
                    DeepQError::invalid_parameter("map".to_string(), format!("unknown tile '{}'", c))
                })?;
                tiles.push(tile);
            }
        }

        let start = tiles
            .iter()
            .position(|&tile| tile == Tile::Start)
            .ok_or_else(|| DeepQError::invalid_parameter("map", "no start tile"))?;
        if !tiles.contains(&Tile::Goal) {
            return Err(DeepQError::invalid_parameter("map", "no goal tile"));
        }
        if config.max_episode_steps == Some(0) {
            return Err(DeepQError::invalid_parameter("max_episode_steps", "must be greater than 0"));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(FrozenLake {
            tiles,
            nrow,
            ncol,
            start,
            is_slippery: config.is_slippery,
            max_episode_steps: config.max_episode_steps.unwrap_or_else(|| config.map.time_limit()),
            position: start,
            elapsed_steps: 0,
            finished: false,
            rng,
        })
    }

    pub fn tile(&self, state: usize) -> Option<Tile> {
        self.tiles.get(state).copied()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn max_episode_steps(&self) -> usize {
        self.max_episode_steps
    }

    /// Cell reached by moving `action` from `state`; walls keep the agent in place.
    fn moved(&self, state: usize, action: usize) -> usize {
        let (mut row, mut col) = (state / self.ncol, state % self.ncol);
        match action {
            LEFT => col = col.saturating_sub(1),
            DOWN => row = (row + 1).min(self.nrow - 1),
            RIGHT => col = (col + 1).min(self.ncol - 1),
            UP => row = row.saturating_sub(1),
            _ => {}
        }
        row * self.ncol + col
    }

    /// Render the lake with the agent marked as `*`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.nrow);
        for (i, tile) in self.tiles.iter().enumerate() {
            let c = if i == self.position {
                '*'
            } else {
                match tile {
                    Tile::Start => 'S',
                    Tile::Frozen => 'F',
                    Tile::Hole => 'H',
                    Tile::Goal => 'G',
                }
            };
            out.push(c);
            if (i + 1) % self.ncol == 0 {
                out.push('\n');
            }
        }
        out
    }
}

impl Environment for FrozenLake {
    fn observation_space(&self) -> Discrete {
        Discrete::new(self.tiles.len())
    }

    fn action_space(&self) -> Discrete {
        Discrete::new(NUM_ACTIONS)
    }

    fn reset(&mut self) -> Result<usize> {
        self.position = self.start;
        self.elapsed_steps = 0;
        self.finished = false;
        Ok(self.position)
    }

    fn step(&mut self, action: usize) -> Result<Step> {
        if action >= NUM_ACTIONS {
            return Err(DeepQError::InvalidAction { action, max_actions: NUM_ACTIONS });
        }
        if self.finished {
            return Err(DeepQError::Environment("step called on a finished episode; reset first".to_string()));
        }

        let (direction, probability) = if self.is_slippery {
            let slip = self.rng.gen_range(0..3);
            ((action + NUM_ACTIONS - 1 + slip) % NUM_ACTIONS, 1.0 / 3.0)
        } else {
            (action, 1.0)
        };

        self.position = self.moved(self.position, direction);
        self.elapsed_steps += 1;

        let tile = self.tiles[self.position];
        let reward = if tile == Tile::Goal { 1.0 } else { 0.0 };
        let terminated = tile.is_terminal();
        let truncated = !terminated && self.elapsed_steps >= self.max_episode_steps;
        let done = terminated || truncated;
        self.finished = done;

        Ok(Step {
            next_state: self.position,
            reward,
            done,
            info: StepInfo { probability, truncated },
        })
    }
}
