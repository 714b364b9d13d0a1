use std::io;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use screen_select::{
    Button, InputEvent, OutputId, OutputInfo, OutputLayout, Point, Rect, Redraw, SelectionSession,
    SessionConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "select-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Event-heavy benchmark for checking selection state machine throughput"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 10.0
    )]
    duration_seconds: f64,

    /// Simulated frame rate. Used to pace update ticks so comparisons are repeatable.
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = 60.0)]
    target_fps: f64,

    /// Input events delivered per simulated frame.
    #[arg(short = 'e', long = "events", value_name = "COUNT", default_value_t = 256)]
    events_per_frame: u32,

    /// Emit the session's debug trace to stderr while running.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl BenchCli {
    fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_seconds)
    }

    fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps)
    }
}

struct BenchConfig {
    duration: Duration,
    target_fps: f64,
    frame_budget: Duration,
    events_per_frame: u32,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.5..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.5 and 600 seconds".to_string());
        }
        if !(1.0..=240.0).contains(&cli.target_fps) {
            return Err("fps must be between 1 and 240".to_string());
        }
        if !(1..=65_536).contains(&cli.events_per_frame) {
            return Err("events must be between 1 and 65536".to_string());
        }
        Ok(Self {
            duration: cli.duration(),
            target_fps: cli.target_fps,
            frame_budget: cli.frame_budget(),
            events_per_frame: cli.events_per_frame,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    if args.verbose {
        screen_select::trace::init_default();
    }

    let stats = run_benchmark(&config);
    println!("{}", stats.final_report(&config));

    Ok(())
}

fn run_benchmark(config: &BenchConfig) -> BenchStats {
    let outputs = OutputLayout::new(vec![
        OutputInfo::new(Rect::new(0, 0, 1920, 1080), "bench-0"),
        OutputInfo::new(Rect::new(1920, 0, 2560, 1440), "bench-1"),
    ]);
    // Alter mode keeps the session alive indefinitely: presses outside the
    // box restart the draw, presses inside grab or move it.
    let session_config = SessionConfig {
        alter_selection: true,
        ..Default::default()
    };

    let mut session = SelectionSession::new(session_config, outputs);
    let mut pointer = SyntheticPointer::seeded_from_clock();
    let mut stats = BenchStats::new();
    let delta = 1.0 / config.target_fps;

    loop {
        let frame_start = Instant::now();

        for _ in 0..config.events_per_frame {
            let outcome = session.handle_event(pointer.next_event());
            stats.events = stats.events.saturating_add(1);
            if outcome.redraw == Redraw::Once {
                stats.redraws = stats.redraws.saturating_add(1);
            }
        }
        if session.update(delta) == Redraw::Once {
            stats.redraws = stats.redraws.saturating_add(1);
        }

        let frame_time = frame_start.elapsed();
        stats.record_frame(frame_time);

        if stats.elapsed() >= config.duration {
            break;
        }
        thread::sleep(config.frame_budget.saturating_sub(frame_time));
    }

    stats.mark_completed();
    stats
}

/// Deterministic-shape pointer that wanders the virtual desktop, pressing
/// and releasing the left button at random intervals. The resulting event
/// stream cycles the session through drawing, altering, resizing and
/// moving without ever reaching a terminal state.
struct SyntheticPointer {
    state: u64,
    pos: Point,
    target: Point,
    pressed: bool,
    steps_left: u32,
}

impl SyntheticPointer {
    fn seeded_from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
            ^ 0xA5A5_A5A5_1234_5678;
        Self {
            state: seed,
            pos: Point::new(960.0, 540.0),
            target: Point::new(960.0, 540.0),
            pressed: false,
            steps_left: 0,
        }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn next_event(&mut self) -> InputEvent {
        let output = OutputId(if self.pos.x >= 1920.0 { 1 } else { 0 });

        if self.steps_left == 0 {
            self.pressed = !self.pressed;
            self.steps_left = 16 + self.next() % 48;
            self.target = Point::new(
                (self.next() % 4480) as f64,
                (self.next() % 1440) as f64,
            );
            return InputEvent::PointerButton {
                button: Button::Left,
                pressed: self.pressed,
                pos: self.pos,
                output,
            };
        }

        self.steps_left -= 1;
        self.pos = Point::new(
            self.pos.x + (self.target.x - self.pos.x) / 8.0,
            self.pos.y + (self.target.y - self.pos.y) / 8.0,
        );
        InputEvent::PointerMotion {
            pos: self.pos,
            output,
        }
    }
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    frame_count: u64,
    events: u64,
    redraws: u64,
    total_frame_time: Duration,
    slowest_frame: Duration,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            frame_count: 0,
            events: 0,
            redraws: 0,
            total_frame_time: Duration::ZERO,
            slowest_frame: Duration::ZERO,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_frame(&mut self, frame_time: Duration) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.total_frame_time += frame_time;
        if frame_time > self.slowest_frame {
            self.slowest_frame = frame_time;
        }
    }

    fn average_frame_us(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        (self.total_frame_time.as_secs_f64() / self.frame_count as f64) * 1_000_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let events_per_sec = if elapsed > 0.0 {
            self.events as f64 / elapsed
        } else {
            0.0
        };

        indoc::formatdoc!(
            r#"
            Select bench completed.
            Duration: {elapsed:.2}s (target {target:.2}s)
            Frames: {frames} (target fps {target_fps:.1})
            Events: {events} total (~{events_per_sec:.0}/s) | redraws requested: {redraws}
            Frame work avg {avg:.1} us | worst {worst:.1} us
            "#,
            elapsed = elapsed,
            target = config.duration.as_secs_f64(),
            frames = self.frame_count,
            target_fps = config.target_fps,
            events = self.events,
            events_per_sec = events_per_sec,
            redraws = self.redraws,
            avg = self.average_frame_us(),
            worst = self.slowest_frame.as_secs_f64() * 1_000_000.0,
        )
    }
}
