use std::io::Write;
use std::time::Duration;

use fortuna_bridge::settings::{load_config, load_or_default};
use fortuna_bridge::{DriverSettings, SvgCanvas, WheelDriver, WheelEvent, WheelWidget};
use fortuna_core::{Canvas, Phase, RecordingCanvas, Style, Tick, WheelConfig, render};
use rand::rngs::mock::StepRng;
use tokio::time::Instant;

fn abcd_config() -> WheelConfig {
    WheelConfig {
        segments: ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect(),
        ..WheelConfig::default()
    }
}

fn attached(config: &WheelConfig) -> WheelWidget<RecordingCanvas> {
    WheelWidget::attach(Some(RecordingCanvas::new(config.size)), config)
        .unwrap()
        .expect("canvas present")
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

// ============================================================================
// Widget Tests
// ============================================================================

#[test]
fn test_widget_declines_without_canvas() {
    let widget = WheelWidget::<RecordingCanvas>::attach(None, &WheelConfig::default()).unwrap();
    assert!(widget.is_none());
}

#[test]
fn test_widget_rejects_invalid_config() {
    let config = WheelConfig {
        segments: Vec::new(),
        ..WheelConfig::default()
    };
    let result = WheelWidget::attach(Some(RecordingCanvas::new(400.0)), &config);
    assert!(result.is_err());
}

#[test]
fn test_widget_starts_closed_and_undrawn() {
    let widget = attached(&WheelConfig::default());
    assert!(!widget.is_open());
    assert_eq!(widget.canvas().clears(), 0);
}

#[test]
fn test_widget_open_draws_wheel_at_zero() {
    let config = WheelConfig::default();
    let mut widget = attached(&config);
    widget.open();

    assert!(widget.is_open());
    assert_eq!(widget.canvas().clears(), 1);
    assert_eq!(widget.canvas().sectors().count(), 12);
    assert_eq!(widget.canvas().sectors().next().unwrap().start, 0.0);
}

#[test]
fn test_widget_spin_ignored_while_closed() {
    let mut widget = attached(&abcd_config());
    let mut rng = StepRng::new(0, 0);
    assert_eq!(widget.spin(&mut rng), None);
    assert_eq!(widget.wheel().phase(), Phase::Idle);
}

#[test]
fn test_widget_advance_repaints_every_frame() {
    let mut widget = attached(&abcd_config());
    let mut rng = StepRng::new(0, 0);
    widget.open();
    assert!(widget.spin(&mut rng).is_some());

    let mut now = 0.0;
    let mut ticks = 0;
    loop {
        ticks += 1;
        match widget.advance(now) {
            Tick::Frame { .. } => now += 100.0,
            Tick::Settled { prize, .. } => {
                assert_eq!(prize.label, "D");
                break;
            }
            Tick::Idle => panic!("spin vanished"),
        }
    }
    // One clear from opening, one per tick.
    assert_eq!(widget.canvas().clears(), 1 + ticks);
    assert_eq!(widget.advance(now + 100.0), Tick::Idle);
    assert_eq!(widget.canvas().clears(), 1 + ticks);
}

#[test]
fn test_widget_close_keeps_spin_running() {
    let mut widget = attached(&abcd_config());
    let mut rng = StepRng::new(0, 0);
    widget.open();
    widget.spin(&mut rng);
    widget.advance(0.0);
    widget.close();

    assert!(widget.is_spinning());
    assert!(matches!(widget.advance(4_000.0), Tick::Settled { .. }));
}

#[test]
fn test_widget_reopen_cancels_spin() {
    let mut widget = attached(&abcd_config());
    let mut rng = StepRng::new(0, 0);
    widget.open();
    widget.spin(&mut rng);
    widget.advance(0.0);
    widget.advance(1_000.0);

    widget.open();
    assert!(!widget.is_spinning());
    assert_eq!(widget.wheel().angle(), 0.0);
    assert_eq!(widget.advance(5_000.0), Tick::Idle);
}

// ============================================================================
// SvgCanvas Tests
// ============================================================================

#[test]
fn test_svg_canvas_draws_sectors_labels_and_pointer() {
    let config = abcd_config();
    let mut canvas = SvgCanvas::new(400.0);
    render(&mut canvas, &config.segments, 0.0, &Style::from(&config));

    let svg = canvas.to_svg_string();
    // Four slices plus the pointer.
    assert_eq!(count(&svg, "<path"), 5);
    assert_eq!(count(&svg, "<text"), 4);
    assert!(svg.contains("#f1c40f"));
    assert!(svg.contains("#e67e22"));
    assert!(svg.contains("#e74c3c"));
    assert!(svg.contains("text-anchor=\"end\""));
    assert!(svg.contains("viewBox=\"0 0 400 400\""));
}

#[test]
fn test_svg_canvas_single_segment_is_a_disc() {
    let mut canvas = SvgCanvas::new(200.0);
    render(&mut canvas, &["Jackpot".to_string()], 1.0, &Style::default());

    let svg = canvas.to_svg_string();
    assert_eq!(count(&svg, "<circle"), 1);
    assert_eq!(count(&svg, "<path"), 1);
    assert!(svg.contains("Jackpot"));
}

#[test]
fn test_svg_canvas_frames_are_independent() {
    let config = abcd_config();
    let style = Style::from(&config);
    let mut canvas = SvgCanvas::new(400.0);

    render(&mut canvas, &config.segments, 0.5, &style);
    let first = canvas.to_svg_string();
    render(&mut canvas, &config.segments, 0.5, &style);

    assert_eq!(canvas.to_svg_string(), first);
    assert_eq!(canvas.frames(), 2);
    assert_eq!(canvas.ops().len(), 9);
}

#[test]
fn test_svg_canvas_saves_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wheel.svg");
    let mut canvas = SvgCanvas::new(400.0);
    render(&mut canvas, &abcd_config().segments, 0.0, &Style::default());
    canvas.save(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<svg"));
    assert_eq!(canvas.size(), 400.0);
}

// ============================================================================
// Driver Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_driver_spins_settles_and_announces_after_delay() {
    let config = abcd_config();
    let widget = attached(&config);
    let (driver, mut events) =
        WheelDriver::start(widget, StepRng::new(0, 0), DriverSettings::from(&config));

    driver.open().await.unwrap();
    driver.spin().await.unwrap();

    assert_eq!(events.recv().await, Some(WheelEvent::Opened));
    assert!(matches!(events.recv().await, Some(WheelEvent::SpinStarted { .. })));

    let mut frames = 0;
    let mut settled_at = None;
    let announced_at;
    loop {
        match events.recv().await.expect("driver alive") {
            WheelEvent::Frame { progress, .. } => {
                assert!(settled_at.is_none());
                assert!(progress < 1.0);
                frames += 1;
            }
            WheelEvent::Settled { prize, angle } => {
                assert_eq!(prize.label, "D");
                assert!(angle.min(std::f64::consts::TAU - angle) < 1e-9);
                settled_at = Some(Instant::now());
            }
            WheelEvent::PrizeAnnounced { prize, message } => {
                assert_eq!(prize.index, 3);
                assert_eq!(message, "¡Ganaste: D!");
                announced_at = Instant::now();
                break;
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    assert!(frames > 100, "only {} frames", frames);
    let settled_at = settled_at.expect("settled before announcing");
    assert!(announced_at - settled_at >= Duration::from_millis(500));

    let widget = driver.shutdown().await.unwrap();
    assert_eq!(widget.wheel().phase(), Phase::Idle);
    assert!(widget.canvas().clears() > frames);
}

#[tokio::test(start_paused = true)]
async fn test_driver_ignores_spin_while_spinning() {
    let config = abcd_config();
    let (driver, mut events) =
        WheelDriver::start(attached(&config), StepRng::new(0, 0), DriverSettings::from(&config));

    driver.open().await.unwrap();
    driver.spin().await.unwrap();
    driver.spin().await.unwrap();

    let mut started = 0;
    loop {
        match events.recv().await.expect("driver alive") {
            WheelEvent::SpinStarted { .. } => started += 1,
            WheelEvent::SpinIgnored => break,
            WheelEvent::Settled { .. } => panic!("second spin was never rejected"),
            _ => {}
        }
    }
    assert_eq!(started, 1);
    driver.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_driver_ignores_spin_before_open() {
    let config = abcd_config();
    let (driver, mut events) =
        WheelDriver::start(attached(&config), StepRng::new(0, 0), DriverSettings::from(&config));

    driver.spin().await.unwrap();
    assert_eq!(events.recv().await, Some(WheelEvent::SpinIgnored));

    let widget = driver.shutdown().await.unwrap();
    assert_eq!(widget.canvas().clears(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_driver_reopen_discards_spin() {
    let config = abcd_config();
    let (driver, mut events) =
        WheelDriver::start(attached(&config), StepRng::new(0, 0), DriverSettings::from(&config));

    driver.open().await.unwrap();
    driver.spin().await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    driver.open().await.unwrap();

    let mut opened = 0;
    while opened < 2 {
        match events.recv().await.expect("driver alive") {
            WheelEvent::Opened => opened += 1,
            WheelEvent::Settled { .. } => panic!("spin should not have finished yet"),
            _ => {}
        }
    }

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(events.try_recv().is_err());

    let widget = driver.shutdown().await.unwrap();
    assert_eq!(widget.wheel().angle(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_driver_close_does_not_stop_spin() {
    let config = abcd_config();
    let (driver, mut events) =
        WheelDriver::start(attached(&config), StepRng::new(0, 0), DriverSettings::from(&config));

    driver.open().await.unwrap();
    driver.spin().await.unwrap();
    driver.close().await.unwrap();

    let mut closed = false;
    loop {
        match events.recv().await.expect("driver alive") {
            WheelEvent::Closed => closed = true,
            WheelEvent::PrizeAnnounced { .. } => break,
            _ => {}
        }
    }
    assert!(closed);
    driver.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_driver_announces_every_settled_spin() {
    // Spins shorter than the announcement delay overlap their timers.
    let config = WheelConfig {
        duration_ms: 100.0,
        announce_delay_ms: 500,
        ..abcd_config()
    };
    let (driver, mut events) =
        WheelDriver::start(attached(&config), StepRng::new(0, 0), DriverSettings::from(&config));

    fn note(event: WheelEvent, settled: &mut Vec<String>, announced: &mut Vec<String>) {
        match event {
            WheelEvent::Settled { prize, .. } => settled.push(prize.label),
            WheelEvent::PrizeAnnounced { prize, .. } => announced.push(prize.label),
            _ => {}
        }
    }

    let mut settled = Vec::new();
    let mut announced = Vec::new();

    driver.open().await.unwrap();
    for round in 1..=2 {
        driver.spin().await.unwrap();
        while settled.len() < round {
            let event = events.recv().await.expect("driver alive");
            note(event, &mut settled, &mut announced);
        }
    }

    tokio::time::sleep(Duration::from_secs(3)).await;
    while let Ok(event) = events.try_recv() {
        note(event, &mut settled, &mut announced);
    }
    assert_eq!(settled, ["D", "D"]);
    assert_eq!(announced, settled);

    driver.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_driver_shutdown_returns_widget() {
    let config = abcd_config();
    let (driver, _events) =
        WheelDriver::start(attached(&config), StepRng::new(0, 0), DriverSettings::from(&config));
    let widget = driver.shutdown().await.unwrap();
    assert!(!widget.is_open());
}

// ============================================================================
// Settings Tests
// ============================================================================

#[test]
fn test_driver_settings_from_config() {
    let config = WheelConfig {
        frame_interval_ms: 0,
        announce_delay_ms: 250,
        ..WheelConfig::default()
    };
    let settings = DriverSettings::from(&config);
    assert_eq!(settings.frame_interval, Duration::from_millis(1));
    assert_eq!(settings.announce_delay, Duration::from_millis(250));
    assert_eq!(settings.announcement, "¡Ganaste: {label}!");
}

#[test]
fn test_load_config_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"segments": ["Uno", "Dos"], "announcement": "You won {{label}}"}}"#).unwrap();

    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.segments.len(), 2);
    assert_eq!(config.announcement, "You won {label}");
}

#[test]
fn test_load_config_explicit_missing_is_an_error() {
    let err = load_config(Some(std::path::Path::new("/no/such/wheel.json"))).unwrap_err();
    assert!(format!("{:#}", err).contains("/no/such/wheel.json"));
}

#[test]
fn test_load_or_default_falls_back_on_garbage() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json at all").unwrap();
    assert_eq!(load_or_default(file.path()), WheelConfig::default());
}
