//! End-to-end wake transactions against mock collaborators
//!
//! Every scenario asserts the invariant that matters most: no matter what
//! the collaborators do, the transaction re-arms both wake sources and
//! reaches the lowest-power state.

use std::cell::RefCell;
use std::rc::Rc;

use haptos_core::config::{BackAnnounce, WatchConfig};
use haptos_core::timer::CountdownTimer;
use haptos_core::traits::{
    Alarm, AlarmControl, Button, ButtonInput, ClockReading, Delay, HapticActuator,
    NotificationChannel, RetentionStore, Rtc, RtcError, SleepControl, StoreError, SyncError,
    TimeSync,
};
use haptos_core::wake::{WakeDispatcher, WakeTrigger};
use haptos_pattern::timing::{DEFAULT_FREQUENCY_HZ, MELODY_INTENSITY, TICK_INTENSITY};
use haptos_pattern::BOOT_MELODY;

#[derive(Default)]
struct Trace {
    intensities: Vec<u8>,
    frequencies: Vec<u16>,
    delay_total_ms: u64,
    armed: Vec<Alarm>,
    disarmed: Vec<Alarm>,
    clock_output_disabled: bool,
    epoch_set: Option<u32>,
    rtc_wake_armed: bool,
    button_wake_mask: Option<u8>,
    slept: bool,
}

impl Trace {
    /// Non-zero motor drives, in order
    fn pulses(&self) -> Vec<u8> {
        self.intensities.iter().copied().filter(|&i| i > 0).collect()
    }
}

struct MockRtc {
    now: u32,
    clock: ClockReading,
    fail: bool,
    trace: Rc<RefCell<Trace>>,
}

impl Rtc for MockRtc {
    fn now_epoch(&mut self) -> Result<u32, RtcError> {
        if self.fail {
            Err(RtcError::Bus)
        } else {
            Ok(self.now)
        }
    }

    fn clock(&mut self) -> Result<ClockReading, RtcError> {
        if self.fail {
            Err(RtcError::Bus)
        } else {
            Ok(self.clock)
        }
    }

    fn set_epoch(&mut self, epoch: u32) -> Result<(), RtcError> {
        self.trace.borrow_mut().epoch_set = Some(epoch);
        Ok(())
    }
}

struct MockAlarms {
    tick_flag: bool,
    hourly_flag: bool,
    trace: Rc<RefCell<Trace>>,
}

impl AlarmControl for MockAlarms {
    fn arm(&mut self, alarm: Alarm) {
        self.trace.borrow_mut().armed.push(alarm);
    }

    fn disarm(&mut self, alarm: Alarm) {
        self.trace.borrow_mut().disarmed.push(alarm);
    }

    fn consume_flag(&mut self, alarm: Alarm) -> bool {
        let flag = match alarm {
            Alarm::PerSecond => &mut self.tick_flag,
            Alarm::Hourly => &mut self.hourly_flag,
        };
        core::mem::take(flag)
    }

    fn disable_clock_output(&mut self) {
        self.trace.borrow_mut().clock_output_disabled = true;
    }
}

struct MockMotor {
    trace: Rc<RefCell<Trace>>,
}

impl HapticActuator for MockMotor {
    fn set_intensity(&mut self, intensity: u8) {
        self.trace.borrow_mut().intensities.push(intensity);
    }

    fn set_frequency(&mut self, hz: u16) {
        self.trace.borrow_mut().frequencies.push(hz);
    }
}

struct MockDelay {
    trace: Rc<RefCell<Trace>>,
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.trace.borrow_mut().delay_total_ms += u64::from(ms);
    }
}

struct MockButtons {
    held_polls: u32,
}

impl ButtonInput for MockButtons {
    fn is_pressed(&mut self, _button: Button) -> bool {
        if self.held_polls > 0 {
            self.held_polls -= 1;
            true
        } else {
            false
        }
    }
}

struct MockNotifications {
    notify_after_ms: Option<u64>,
    trace: Rc<RefCell<Trace>>,
}

impl NotificationChannel for MockNotifications {
    fn has_notification(&mut self) -> bool {
        self.notify_after_ms
            .is_some_and(|at| self.trace.borrow().delay_total_ms >= at)
    }
}

struct MockSync {
    result: Result<u32, SyncError>,
}

impl TimeSync for MockSync {
    fn fetch_epoch(&mut self) -> Result<u32, SyncError> {
        self.result
    }
}

struct MockSleep {
    trace: Rc<RefCell<Trace>>,
}

impl SleepControl for MockSleep {
    fn arm_rtc_wake(&mut self) {
        self.trace.borrow_mut().rtc_wake_armed = true;
    }

    fn arm_button_wake(&mut self, mask: u8) {
        self.trace.borrow_mut().button_wake_mask = Some(mask);
    }

    fn enter_lowest_power(&mut self) {
        self.trace.borrow_mut().slept = true;
    }
}

/// Retained RAM shared with the test so state survives the dispatcher
#[derive(Clone)]
struct SharedStore {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl RetentionStore for SharedStore {
    fn load(&mut self, buf: &mut [u8]) -> Result<usize, StoreError> {
        let bytes = self.bytes.borrow();
        if bytes.len() > buf.len() {
            return Err(StoreError::Capacity);
        }
        buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }

    fn save(&mut self, data: &[u8]) -> Result<(), StoreError> {
        *self.bytes.borrow_mut() = data.to_vec();
        Ok(())
    }
}

struct Scenario {
    now: u32,
    clock: ClockReading,
    rtc_fails: bool,
    tick_flag: bool,
    hourly_flag: bool,
    sync: Result<u32, SyncError>,
    notify_after_ms: Option<u64>,
    deadline: Option<u32>,
    held_polls: u32,
    config: WatchConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            now: 1_000,
            clock: ClockReading::new(10, 30),
            rtc_fails: false,
            tick_flag: false,
            hourly_flag: false,
            sync: Err(SyncError::NoNetwork),
            notify_after_ms: None,
            deadline: None,
            held_polls: 0,
            config: WatchConfig::default(),
        }
    }
}

type MockDispatcher = WakeDispatcher<
    MockRtc,
    MockAlarms,
    MockMotor,
    MockDelay,
    MockButtons,
    MockNotifications,
    MockSync,
    MockSleep,
    SharedStore,
>;

fn build(scenario: Scenario) -> (MockDispatcher, Rc<RefCell<Trace>>, SharedStore) {
    let trace = Rc::new(RefCell::new(Trace::default()));
    let store = SharedStore {
        bytes: Rc::new(RefCell::new(Vec::new())),
    };

    if let Some(deadline) = scenario.deadline {
        // Seed retained memory through the timer's own persistence path
        let mut seeder = CountdownTimer::restore(store.clone());
        seeder.extend(deadline, 0);
    }

    let dispatcher = WakeDispatcher::new(
        MockRtc {
            now: scenario.now,
            clock: scenario.clock,
            fail: scenario.rtc_fails,
            trace: Rc::clone(&trace),
        },
        MockAlarms {
            tick_flag: scenario.tick_flag,
            hourly_flag: scenario.hourly_flag,
            trace: Rc::clone(&trace),
        },
        MockMotor {
            trace: Rc::clone(&trace),
        },
        MockDelay {
            trace: Rc::clone(&trace),
        },
        MockButtons {
            held_polls: scenario.held_polls,
        },
        MockNotifications {
            notify_after_ms: scenario.notify_after_ms,
            trace: Rc::clone(&trace),
        },
        MockSync {
            result: scenario.sync,
        },
        MockSleep {
            trace: Rc::clone(&trace),
        },
        store.clone(),
        scenario.config,
    );

    (dispatcher, trace, store)
}

fn stored_deadline(store: &SharedStore) -> u32 {
    CountdownTimer::restore(store.clone()).deadline()
}

fn assert_rearmed_and_slept(trace: &Trace) {
    assert!(trace.rtc_wake_armed, "RTC wake line not re-armed");
    assert_eq!(
        trace.button_wake_mask,
        Some(Button::ALL_MASK),
        "button wake mask not re-armed"
    );
    assert!(trace.slept, "never reached lowest-power state");
}

#[test]
fn reset_with_unreachable_sync_still_boots() {
    let (mut dispatcher, trace, _) = build(Scenario {
        sync: Err(SyncError::Timeout),
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::Reset);

    let trace = trace.borrow();
    assert_eq!(trace.epoch_set, None);
    assert!(trace.clock_output_disabled);
    assert!(trace.armed.contains(&Alarm::Hourly));
    // The boot melody still played: one pitched drive per note, then the
    // carrier parked back at its default
    let notes = trace
        .intensities
        .iter()
        .filter(|&&i| i == MELODY_INTENSITY)
        .count();
    assert_eq!(notes, BOOT_MELODY.len());
    assert_eq!(trace.frequencies.last(), Some(&DEFAULT_FREQUENCY_HZ));
    assert_rearmed_and_slept(&trace);
}

#[test]
fn reset_with_working_sync_sets_clock() {
    let (mut dispatcher, trace, _) = build(Scenario {
        sync: Ok(1_700_000_000),
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::Reset);

    let trace = trace.borrow();
    assert_eq!(trace.epoch_set, Some(1_700_000_000));
    assert!(trace.armed.contains(&Alarm::Hourly));
    assert_rearmed_and_slept(&trace);
}

#[test]
fn down_button_seeds_and_starts_countdown() {
    let (mut dispatcher, trace, store) = build(Scenario {
        now: 1_000,
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::Buttons(Button::Down.mask()));

    assert_eq!(stored_deadline(&store), 1_060);
    let trace = trace.borrow();
    assert!(trace.armed.contains(&Alarm::PerSecond));
    assert_rearmed_and_slept(&trace);
}

#[test]
fn down_button_extends_running_countdown() {
    let (mut dispatcher, _, store) = build(Scenario {
        now: 1_000,
        deadline: Some(5_000),
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::Buttons(Button::Down.mask()));

    assert_eq!(stored_deadline(&store), 5_060);
}

#[test]
fn tick_at_deadline_celebrates_and_stops() {
    let (mut dispatcher, trace, store) = build(Scenario {
        now: 5_000,
        deadline: Some(5_000),
        tick_flag: true,
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::RtcAlarm);

    let trace = trace.borrow();
    // The success staircase, rising to full drive
    assert_eq!(trace.pulses(), vec![64, 64, 96, 128, 255]);
    assert!(trace.disarmed.contains(&Alarm::PerSecond));
    assert_eq!(stored_deadline(&store), 0);
    assert_rearmed_and_slept(&trace);
}

#[test]
fn tick_before_deadline_is_a_pitched_nudge() {
    let (mut dispatcher, trace, store) = build(Scenario {
        now: 5_000,
        deadline: Some(5_010),
        tick_flag: true,
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::RtcAlarm);

    let trace = trace.borrow();
    assert_eq!(trace.pulses(), vec![TICK_INTENSITY]);
    // 10 s remaining at a 15 kHz final-second ceiling
    assert!(trace.frequencies.contains(&1_500));
    assert_eq!(stored_deadline(&store), 5_010);
    assert_rearmed_and_slept(&trace);
}

#[test]
fn tick_and_chime_share_one_wake_tick_first() {
    let (mut dispatcher, trace, _) = build(Scenario {
        now: 5_000,
        deadline: Some(5_010),
        tick_flag: true,
        hourly_flag: true,
        clock: ClockReading::new(9, 0),
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::RtcAlarm);

    let trace = trace.borrow();
    let pulses = trace.pulses();
    // Tick first, then the five hour pulses
    assert_eq!(pulses.first(), Some(&TICK_INTENSITY));
    assert_eq!(pulses.iter().filter(|&&i| i == 255).count(), 5);
    assert_rearmed_and_slept(&trace);
}

#[test]
fn stale_tick_without_countdown_stays_silent() {
    let (mut dispatcher, trace, _) = build(Scenario {
        tick_flag: true,
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::RtcAlarm);

    let trace = trace.borrow();
    assert!(trace.pulses().is_empty());
    assert!(trace.disarmed.contains(&Alarm::PerSecond));
    assert_rearmed_and_slept(&trace);
}

#[test]
fn menu_stops_running_countdown() {
    let (mut dispatcher, trace, store) = build(Scenario {
        deadline: Some(5_000),
        held_polls: 3,
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::Buttons(Button::Menu.mask()));

    assert_eq!(stored_deadline(&store), 0);
    let trace = trace.borrow();
    assert!(trace.disarmed.contains(&Alarm::PerSecond));
    // Press acknowledgment only; no pairing patterns followed
    assert_eq!(trace.pulses(), vec![255]);
    assert_rearmed_and_slept(&trace);
}

#[test]
fn menu_idle_pairs_and_hears_notification_early() {
    let (mut dispatcher, trace, _) = build(Scenario {
        notify_after_ms: Some(5_000),
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::Buttons(Button::Menu.mask()));

    let trace = trace.borrow();
    // Session left at the notification, nowhere near the 30 s budget
    assert!(
        trace.delay_total_ms < 7_000,
        "session ran {} ms",
        trace.delay_total_ms
    );
    // Press ack, then the success staircase
    assert_eq!(trace.pulses(), vec![255, 64, 64, 96, 128, 255]);
    assert_rearmed_and_slept(&trace);
}

#[test]
fn menu_idle_pairing_times_out_with_failure() {
    let (mut dispatcher, trace, _) = build(Scenario::default());
    dispatcher.handle_wake(WakeTrigger::Buttons(Button::Menu.mask()));

    let trace = trace.borrow();
    assert!(trace.delay_total_ms >= 30_000);
    // Press ack, then two falling bursts
    assert_eq!(
        trace.pulses(),
        vec![255, 255, 128, 96, 64, 32, 255, 128, 96, 64, 32]
    );
    assert_rearmed_and_slept(&trace);
}

#[test]
fn up_button_idle_announces_split_minute() {
    let (mut dispatcher, trace, _) = build(Scenario {
        clock: ClockReading::new(10, 47),
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::Buttons(Button::Up.mask()));

    let trace = trace.borrow();
    // 2 quarter bits + 4 offset bits
    assert_eq!(trace.pulses().len(), 6);
    assert_rearmed_and_slept(&trace);
}

#[test]
fn up_button_extends_running_countdown() {
    let (mut dispatcher, trace, store) = build(Scenario {
        now: 1_000,
        deadline: Some(5_000),
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::Buttons(Button::Up.mask()));

    assert_eq!(stored_deadline(&store), 5_300);
    let trace = trace.borrow();
    // No announcement while the countdown runs
    assert!(trace.pulses().is_empty());
    assert_rearmed_and_slept(&trace);
}

#[test]
fn back_button_announces_full_time() {
    let (mut dispatcher, trace, _) = build(Scenario {
        clock: ClockReading::new(13, 37),
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::Buttons(Button::Back.mask()));

    let trace = trace.borrow();
    // 5 hour bits + 6 minute bits
    assert_eq!(trace.pulses().len(), 11);
    assert_rearmed_and_slept(&trace);
}

#[test]
fn back_button_hour_only_variant() {
    let (mut dispatcher, trace, _) = build(Scenario {
        clock: ClockReading::new(13, 37),
        config: WatchConfig {
            back_button: BackAnnounce::HourOnly,
            ..Default::default()
        },
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::Buttons(Button::Back.mask()));

    let trace = trace.borrow();
    assert_eq!(trace.pulses().len(), 5);
    assert_rearmed_and_slept(&trace);
}

#[test]
fn chime_announces_hour_and_optionally_resyncs() {
    let (mut dispatcher, trace, _) = build(Scenario {
        hourly_flag: true,
        clock: ClockReading::new(3, 0),
        sync: Ok(1_700_000_000),
        config: WatchConfig {
            resync_hour: Some(3),
            ..Default::default()
        },
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::RtcAlarm);

    let trace = trace.borrow();
    assert_eq!(trace.pulses().len(), 5);
    assert_eq!(trace.epoch_set, Some(1_700_000_000));
    assert_rearmed_and_slept(&trace);
}

#[test]
fn chime_off_resync_hour_does_not_sync() {
    let (mut dispatcher, trace, _) = build(Scenario {
        hourly_flag: true,
        clock: ClockReading::new(4, 0),
        sync: Ok(1_700_000_000),
        config: WatchConfig {
            resync_hour: Some(3),
            ..Default::default()
        },
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::RtcAlarm);

    let trace = trace.borrow();
    assert_eq!(trace.epoch_set, None);
    assert_rearmed_and_slept(&trace);
}

#[test]
fn spurious_wakes_sleep_silently() {
    for trigger in [WakeTrigger::Buttons(0), WakeTrigger::RtcAlarm] {
        let (mut dispatcher, trace, _) = build(Scenario::default());
        dispatcher.handle_wake(trigger);

        let trace = trace.borrow();
        assert!(trace.intensities.is_empty(), "spurious wake made noise");
        assert_rearmed_and_slept(&trace);
    }
}

#[test]
fn rtc_failure_never_blocks_sleep() {
    let (mut dispatcher, trace, store) = build(Scenario {
        rtc_fails: true,
        deadline: Some(5_000),
        tick_flag: true,
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::RtcAlarm);

    // Deadline untouched, no pattern, but the device still went down cleanly
    assert_eq!(stored_deadline(&store), 5_000);
    let trace = trace.borrow();
    assert!(trace.pulses().is_empty());
    assert_rearmed_and_slept(&trace);
}

#[test]
fn invalid_config_falls_back_to_defaults() {
    let (mut dispatcher, trace, _) = build(Scenario {
        clock: ClockReading::new(13, 37),
        config: WatchConfig {
            hour_bits: 0,
            ..Default::default()
        },
        ..Default::default()
    });
    dispatcher.handle_wake(WakeTrigger::Buttons(Button::Back.mask()));

    let trace = trace.borrow();
    // Default widths: 5 hour bits + 6 minute bits
    assert_eq!(trace.pulses().len(), 11);
    assert_rearmed_and_slept(&trace);
}
