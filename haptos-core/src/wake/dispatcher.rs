//! The wake dispatcher
//!
//! One hardware wake = one bounded transaction: sample the raw signals,
//! classify, run a single handler, then unconditionally re-arm both wake
//! sources and power down. The re-arm is the one step that may never be
//! skipped; a missed re-arm is a device that never wakes again. Handlers
//! therefore swallow every collaborator failure.

use haptos_pattern::timing::{PULSE_INTENSITY, SHORT_PULSE_MS};
use haptos_pattern::{render_melody, success, tick, HapticStep, BOOT_MELODY};

use crate::announce::{hour_pattern, minute_pattern, time_pattern};
use crate::config::{BackAnnounce, WatchConfig};
use crate::pairing;
use crate::player::play;
use crate::timer::CountdownTimer;
use crate::traits::{
    Alarm, AlarmControl, Button, ButtonInput, Delay, HapticActuator, NotificationChannel,
    RetentionStore, Rtc, SleepControl, TimeSync,
};
use crate::wake::cause::{classify, WakeCause, WakeSignals, WakeTrigger};

/// Debounce poll interval
const DEBOUNCE_POLL_MS: u32 = 10;

/// Tick pitch at one second remaining; longer countdowns divide this down
const TICK_PITCH_CEILING_HZ: u16 = 15_000;

/// The top-level wake state machine
///
/// Owns the collaborators for the duration of the device's life; wakes are
/// serialized by the hardware sleep cycle, so nothing here needs locking.
pub struct WakeDispatcher<R, A, M, D, B, N, T, W, S>
where
    R: Rtc,
    A: AlarmControl,
    M: HapticActuator,
    D: Delay,
    B: ButtonInput,
    N: NotificationChannel,
    T: TimeSync,
    W: SleepControl,
    S: RetentionStore,
{
    rtc: R,
    alarms: A,
    motor: M,
    delay: D,
    buttons: B,
    notifications: N,
    sync: T,
    sleep: W,
    timer: CountdownTimer<S>,
    config: WatchConfig,
}

impl<R, A, M, D, B, N, T, W, S> WakeDispatcher<R, A, M, D, B, N, T, W, S>
where
    R: Rtc,
    A: AlarmControl,
    M: HapticActuator,
    D: Delay,
    B: ButtonInput,
    N: NotificationChannel,
    T: TimeSync,
    W: SleepControl,
    S: RetentionStore,
{
    /// Assemble the dispatcher, restoring the countdown from retained
    /// memory
    ///
    /// An invalid configuration is replaced with the defaults rather than
    /// refused; the device must always be able to run its wake.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rtc: R,
        alarms: A,
        motor: M,
        delay: D,
        buttons: B,
        notifications: N,
        sync: T,
        sleep: W,
        store: S,
        config: WatchConfig,
    ) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("invalid config ({}), using defaults", e);
                WatchConfig::default()
            }
        };

        Self {
            rtc,
            alarms,
            motor,
            delay,
            buttons,
            notifications,
            sync,
            sleep,
            timer: CountdownTimer::restore(store),
            config,
        }
    }

    /// Run one complete wake transaction
    ///
    /// Every path through here ends in [`Self::rearm_and_sleep`].
    pub fn handle_wake(&mut self, trigger: WakeTrigger) {
        let signals = self.sample(trigger);
        self.press_feedback(&signals);

        match classify(&signals) {
            Some(cause) => {
                info!("wake: {}", cause);
                self.dispatch(cause, &signals);
            }
            None => debug!("spurious wake, straight back to sleep"),
        }

        self.rearm_and_sleep();
    }

    /// Sample the raw wake signals, consuming the alarm flags exactly once
    fn sample(&mut self, trigger: WakeTrigger) -> WakeSignals {
        match trigger {
            WakeTrigger::RtcAlarm => WakeSignals::for_alarm(
                self.alarms.consume_flag(Alarm::PerSecond),
                self.alarms.consume_flag(Alarm::Hourly),
            ),
            WakeTrigger::Buttons(mask) => WakeSignals::for_buttons(mask),
            WakeTrigger::Reset => WakeSignals::for_reset(),
        }
    }

    /// Immediate acknowledgment for the action buttons
    ///
    /// Menu and Down get a short buzz the moment the wake is seen, before
    /// any handler work. The time buttons stay silent so the buzz is never
    /// mistaken for the first pulse of an announcement.
    fn press_feedback(&mut self, signals: &WakeSignals) {
        const ACK_MASK: u8 = Button::Menu.mask() | Button::Down.mask();
        if signals.buttons & ACK_MASK != 0 {
            play(
                &mut self.motor,
                &mut self.delay,
                &[HapticStep::drive(PULSE_INTENSITY, SHORT_PULSE_MS)],
            );
        }
    }

    fn dispatch(&mut self, cause: WakeCause, signals: &WakeSignals) {
        match cause {
            WakeCause::TimerTick => {
                self.on_timer_tick();
                // The alarms are independent flags; a tick wake can carry
                // the chime too, tick first.
                if signals.hourly_alarm {
                    self.on_hourly_chime();
                }
            }
            WakeCause::HourlyChime => self.on_hourly_chime(),
            WakeCause::ButtonMenu => self.on_button_menu(),
            WakeCause::ButtonDown => self.on_button_down(),
            WakeCause::ButtonBack => self.on_button_back(),
            WakeCause::ButtonUp => self.on_button_up(),
            WakeCause::PowerOnReset => self.on_reset(),
        }
    }

    fn on_reset(&mut self) {
        self.run_time_sync();

        self.alarms.disable_clock_output();
        // Armed no matter how the sync went
        self.alarms.arm(Alarm::Hourly);

        if let Ok(pattern) = render_melody(&BOOT_MELODY) {
            play(&mut self.motor, &mut self.delay, &pattern);
        }
    }

    fn on_timer_tick(&mut self) {
        if !self.timer.is_active() {
            debug!("tick with no countdown, disarming stale alarm");
            self.alarms.disarm(Alarm::PerSecond);
            return;
        }

        let now = match self.rtc.now_epoch() {
            Ok(now) => now,
            Err(e) => {
                warn!("clock read failed, skipping tick: {}", e);
                return;
            }
        };

        if self.timer.check_expired(now) {
            play(&mut self.motor, &mut self.delay, &success());
            self.timer.stop(&mut self.alarms);
        } else {
            let remaining = self.timer.deadline() - now;
            let pitch = if self.config.tick_pitch {
                Some(tick_pitch_hz(remaining))
            } else {
                None
            };
            play(&mut self.motor, &mut self.delay, &tick(pitch));
        }
    }

    fn on_hourly_chime(&mut self) {
        let clock = match self.rtc.clock() {
            Ok(clock) => clock,
            Err(e) => {
                warn!("clock read failed, skipping chime: {}", e);
                return;
            }
        };

        match hour_pattern(&self.config, clock.hour) {
            Ok(pattern) => play(&mut self.motor, &mut self.delay, &pattern),
            Err(e) => warn!("hour encode failed: {}", e),
        }

        if self.config.resync_hour == Some(clock.hour) {
            self.run_time_sync();
        }
    }

    fn on_button_menu(&mut self) {
        if self.timer.is_active() {
            self.timer.stop(&mut self.alarms);
            self.debounce(Button::Menu);
        } else {
            let outcome = pairing::run(
                &mut self.buttons,
                &mut self.notifications,
                &mut self.motor,
                &mut self.delay,
                self.config.pairing_timeout_ms,
            );
            info!("pairing session ended: {}", outcome);
        }
    }

    fn on_button_down(&mut self) {
        match self.rtc.now_epoch() {
            Ok(now) => {
                self.timer.extend(now, self.config.short_extend_s);
                self.timer.start(&mut self.alarms);
            }
            Err(e) => warn!("clock read failed, countdown unchanged: {}", e),
        }
        self.debounce(Button::Down);
    }

    fn on_button_up(&mut self) {
        if self.timer.is_active() {
            match self.rtc.now_epoch() {
                Ok(now) => self.timer.extend(now, self.config.long_extend_s),
                Err(e) => warn!("clock read failed, countdown unchanged: {}", e),
            }
        } else {
            match self.rtc.clock() {
                Ok(clock) => {
                    if let Some(result) = minute_pattern(&self.config, clock.minute) {
                        match result {
                            Ok(pattern) => play(&mut self.motor, &mut self.delay, &pattern),
                            Err(e) => warn!("minute encode failed: {}", e),
                        }
                    }
                }
                Err(e) => warn!("clock read failed, skipping announcement: {}", e),
            }
        }
        self.debounce(Button::Up);
    }

    fn on_button_back(&mut self) {
        let clock = match self.rtc.clock() {
            Ok(clock) => clock,
            Err(e) => {
                warn!("clock read failed, skipping announcement: {}", e);
                return;
            }
        };

        let pattern = match self.config.back_button {
            BackAnnounce::FullTime => time_pattern(&self.config, clock),
            BackAnnounce::HourOnly => hour_pattern(&self.config, clock.hour),
        };
        match pattern {
            Ok(pattern) => play(&mut self.motor, &mut self.delay, &pattern),
            Err(e) => warn!("time encode failed: {}", e),
        }
    }

    fn run_time_sync(&mut self) {
        match self.sync.fetch_epoch() {
            Ok(epoch) => {
                if let Err(e) = self.rtc.set_epoch(epoch) {
                    warn!("clock not set after sync: {}", e);
                }
            }
            Err(e) => warn!("time sync failed: {}", e),
        }
    }

    /// Block until the line drops
    fn debounce(&mut self, button: Button) {
        while self.buttons.is_pressed(button) {
            self.delay.delay_ms(DEBOUNCE_POLL_MS);
        }
    }

    /// The mandatory transaction epilogue
    fn rearm_and_sleep(&mut self) {
        self.sleep.arm_rtc_wake();
        self.sleep.arm_button_wake(Button::ALL_MASK);
        self.sleep.enter_lowest_power();
    }
}

/// Pitch for the countdown tick: inversely proportional to the remaining
/// time, peaking at the ceiling in the final second
fn tick_pitch_hz(remaining_s: u32) -> u16 {
    let hz = u32::from(TICK_PITCH_CEILING_HZ) / remaining_s.max(1);
    // The motor is inert below ~100 Hz
    hz.max(100) as u16
}
