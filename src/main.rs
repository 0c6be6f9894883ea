//! Marble Race headless runner
//!
//! Drives a course at the fixed tick rate on a simulated clock and logs the
//! run: `marble-race [settings.json] [ticks]`.

fn main() {
    env_logger::init();
    log::info!("Marble Race (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> marble_race::Result<()> {
    use marble_race::scene::{colliders, instances_from_targets};
    use marble_race::sim::{Course, ManualClock, TickInput, tick};
    use marble_race::{CourseError, Settings};

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let ticks: u64 = match args.next() {
        Some(n) => n
            .parse()
            .map_err(|_| CourseError::Config(format!("tick count '{n}' is not a number")))?,
        None => 10 * settings.tick_rate_hz as u64,
    };

    let clock = ManualClock::new(0.0);
    let dt_ms = settings.sim_dt() as f64 * 1000.0;
    let mut course = Course::new(settings, clock.clone())?;
    log::info!(
        "Level seed {} with {} obstacles, {} colliders",
        course.level().seed,
        course.level().count(),
        colliders(course.level()).len()
    );

    // Start on the first tick, finish halfway, restart on the last.
    let finish_tick = ticks / 2;
    for i in 0..ticks {
        let input = TickInput {
            start: i == 0,
            end: i == finish_tick,
            restart: i + 1 == ticks,
        };
        let targets = tick(&mut course, &input)?;
        clock.advance(dt_ms);

        if i == finish_tick {
            let instances = instances_from_targets(&targets);
            log::info!(
                "Finish at t={:.2}s, {} obstacle instances ({} bytes)",
                course.elapsed(),
                instances.len(),
                bytemuck::cast_slice::<_, u8>(&instances).len()
            );
            if let Some(ms) = course.run_duration_ms() {
                println!("Run time: {:.3}s", ms / 1000.0);
            }
        }
    }

    println!(
        "Phase {} after {} ticks, next seed {}",
        course.phase().as_str(),
        course.time_ticks(),
        course.level().seed
    );
    Ok(())
}
