/***
# FrozenLake Deep Q-Learning

* Usage: `frozen-dqn [config.json]`
* Without a config file the defaults are used: 4x4 slippery lake, 100 000 episodes,
  1000 warm-up episodes, replay memory of 10 games x 100 steps
* Progress is logged per episode and per evaluation; set `RUST_LOG` to change verbosity
* Set `metrics_path` in the config to keep the per-episode history as JSON
***/

use std::process::ExitCode;

use frozen_dqn::config::RunConfig;
use frozen_dqn::environment::FrozenLake;
use frozen_dqn::error::Result;
use frozen_dqn::logging::init_logging;
use frozen_dqn::trainer::{Trainer, RECENT_WINDOW};

fn run() -> Result<()> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => RunConfig::from_json_file(&path)?,
        None => RunConfig::default(),
    };
    if config.lake.max_episode_steps.is_none() {
        config.lake.max_episode_steps = Some(config.agent.step_limit);
    }

    let env = FrozenLake::new(&config.lake)?;
    log::info!("Training on\n{}", env.render());

    let start_time = std::time::Instant::now();
    let mut trainer = Trainer::from_config(env, config.agent.clone())?;
    let summary = trainer.run()?;

    log::info!(
        "Finished {} episodes in {:.1?}: total reward {}, win rate {}, last {} episodes {:?}, replay memory {}",
        summary.episodes,
        start_time.elapsed(),
        summary.total_reward,
        summary.win_rate,
        RECENT_WINDOW,
        summary.recent_win_rate,
        summary.replay_size
    );
    if let Some(best) = trainer.tracker().best_test() {
        log::info!("Best test: {} out of {} after {} episodes", best.total_reward, best.cycles, best.episode);
    }
    if let Some(path) = &config.metrics_path {
        trainer.tracker().save(path)?;
        log::info!("Metrics written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
