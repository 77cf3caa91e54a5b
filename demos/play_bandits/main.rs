use std::error::Error;

use k_armed_bandits::{
    env::{Bandits, BanditsConfig},
    gym::{FixedBanditsConfig, FixedValueBandits, GaussianBanditsConfig, GaussianValueBandits},
};

const MAX_STEPS: usize = 20;

/// Pull every arm in turn until the episode is done
fn play<B: Bandits>(env: &mut B) {
    let mut done = false;
    while !done {
        for action in env.actions() {
            let (_, reward, is_done) = env.step(action);
            println!("step {:>3}  arm {action}  reward {reward:.3}", env.step_num());
            done = is_done;
            if done {
                break;
            }
        }
    }

    let report = env.report_mut().take();
    println!("score {:.3} over {} steps", report["score"], report["steps"]);
}

fn main() -> Result<(), Box<dyn Error>> {
    let base = BanditsConfig {
        max_steps: MAX_STEPS,
        ..Default::default()
    };

    println!("Fixed bandits");
    let config = FixedBanditsConfig {
        base: base.clone(),
        ..Default::default()
    };
    config.validate()?;
    play(&mut FixedValueBandits::from_config(config));

    println!("Gaussian bandits");
    let config = GaussianBanditsConfig {
        base,
        ..Default::default()
    };
    config.validate()?;
    play(&mut GaussianValueBandits::from_config(config));

    Ok(())
}
