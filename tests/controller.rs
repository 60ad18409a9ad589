mod tests {
    use myrtio_flicker_composer::table::{FLICKER, OFF};
    use myrtio_flicker_composer::{
        ActivityCycleController, ActivityPhase, Board, ChannelBank, CycleConfig, Duration,
        OutputPort, PwmEngine, RandomSource, SplitMix, WakeSignal,
    };

    /// Counts draws taken from the wrapped source
    struct Counting {
        inner: SplitMix,
        draws: usize,
    }

    impl RandomSource for Counting {
        fn next_byte(&mut self) -> u8 {
            self.draws += 1;
            self.inner.next_byte()
        }
    }

    /// Records everything the controller asks of the hardware
    struct MockBoard<'a, const N: usize> {
        pwm: &'a PwmEngine<N>,
        wake: &'a WakeSignal,
        mask: Option<u8>,
        writes: Vec<u8>,
        delays: Vec<Duration>,
        idles: usize,
        /// Registers seen during each step wait
        seen: Vec<[u8; N]>,
        /// Fire the wake interrupt during every step wait
        retrigger: bool,
    }

    impl<'a, const N: usize> MockBoard<'a, N> {
        fn new(pwm: &'a PwmEngine<N>, wake: &'a WakeSignal) -> Self {
            Self {
                pwm,
                wake,
                mask: None,
                writes: Vec::new(),
                delays: Vec::new(),
                idles: 0,
                seen: Vec::new(),
                retrigger: false,
            }
        }
    }

    impl<const N: usize> OutputPort for MockBoard<'_, N> {
        fn write(&mut self, bits: u8) {
            self.writes.push(bits);
        }
    }

    impl<const N: usize> Board for MockBoard<'_, N> {
        fn configure_outputs(&mut self, mask: u8) {
            self.mask = Some(mask);
        }

        fn wait_for_interrupt(&mut self) {
            self.idles += 1;
            self.wake.signal();
        }

        fn delay(&mut self, duration: Duration) {
            assert!(self.pwm.is_enabled());
            self.seen.push(self.pwm.levels());
            self.delays.push(duration);
            if self.retrigger {
                self.wake.signal();
            }
        }
    }

    fn config() -> CycleConfig {
        // floor(1000 / 30) = 33
        CycleConfig::new(Duration::from_millis(30), Duration::from_millis(1000))
    }

    #[test]
    fn test_default_config_steps() {
        assert_eq!(CycleConfig::DEFAULT.steps_per_window(), 500);
        assert_eq!(config().steps_per_window(), 33);
        assert_eq!(
            CycleConfig::new(Duration::from_millis(20), Duration::from_millis(19))
                .steps_per_window(),
            0
        );
    }

    #[test]
    fn test_init_configures_and_clears_outputs() {
        let pwm: PwmEngine<4> = PwmEngine::new();
        let wake = WakeSignal::new();
        let mut board = MockBoard::new(&pwm, &wake);
        let mut controller =
            ActivityCycleController::new(&FLICKER, SplitMix::default(), &pwm, &wake, config());

        controller.init(&mut board);
        assert_eq!(board.mask, Some(0b1111));
        assert_eq!(board.writes, [0]);
        assert!(!pwm.is_enabled());
        assert_eq!(controller.phase(), ActivityPhase::Sleeping);
    }

    #[test]
    fn test_window_runs_fixed_step_count() {
        let pwm: PwmEngine<4> = PwmEngine::new();
        let wake = WakeSignal::new();
        let mut board = MockBoard::new(&pwm, &wake);
        let rng = Counting {
            inner: SplitMix::default(),
            draws: 0,
        };
        let mut controller = ActivityCycleController::new(&FLICKER, rng, &pwm, &wake, config());

        let steps = controller.run_active_window(&mut board);
        assert_eq!(steps, 33);
        assert_eq!(board.delays.len(), 33);
        assert!(board.delays.iter().all(|d| *d == Duration::from_millis(30)));
        assert_eq!(controller.rng().draws, 33 * 4);

        assert_eq!(pwm.levels(), [0; 4]);
        assert_eq!(pwm.output(), 0);
        assert!(!pwm.is_enabled());
        assert_eq!(board.writes.last(), Some(&0));
        assert_eq!(controller.phase(), ActivityPhase::Sleeping);
    }

    #[test]
    fn test_registers_follow_channel_states() {
        let pwm: PwmEngine<4> = PwmEngine::new();
        let wake = WakeSignal::new();
        let mut board = MockBoard::new(&pwm, &wake);
        let mut controller =
            ActivityCycleController::new(&FLICKER, SplitMix::default(), &pwm, &wake, config());

        controller.run_active_window(&mut board);

        // Replay the same seed outside the controller
        let mut rng = SplitMix::default();
        let mut bank = ChannelBank::<4>::new(&FLICKER);
        for seen in &board.seen {
            assert_eq!(&bank.step(&mut rng), seen);
        }
        assert_eq!(controller.channels().states(), bank.states());
    }

    #[test]
    fn test_state_persists_across_sleep() {
        let pwm: PwmEngine<4> = PwmEngine::new();
        let wake = WakeSignal::new();
        let mut board = MockBoard::new(&pwm, &wake);
        // floor(500 / 20) = 25 steps leaves channel 2 at ON
        let config = CycleConfig::new(Duration::from_millis(20), Duration::from_millis(500));
        let mut controller =
            ActivityCycleController::new(&FLICKER, SplitMix::default(), &pwm, &wake, config);

        controller.init(&mut board);
        controller.run_cycle(&mut board);
        let before_sleep = controller.channels().states();
        assert_ne!(before_sleep, [OFF; 4]);

        controller.sleep_until_wake(&mut board);
        assert_eq!(controller.channels().states(), before_sleep);
        assert_eq!(pwm.levels(), [0; 4]);

        // First step of the next window starts from the persisted states
        board.seen.clear();
        controller.run_active_window(&mut board);
        let mut rng = SplitMix::default();
        let mut replay = ChannelBank::<4>::new(&FLICKER);
        for _ in 0..25 {
            replay.step(&mut rng);
        }
        assert_eq!(replay.states(), before_sleep);
        assert_eq!(board.seen[0], replay.step(&mut rng));
    }

    #[test]
    fn test_retrigger_during_window_is_ignored() {
        let pwm: PwmEngine<2> = PwmEngine::new();
        let wake = WakeSignal::new();
        let mut board = MockBoard::new(&pwm, &wake);
        board.retrigger = true;
        let mut controller =
            ActivityCycleController::new(&FLICKER, SplitMix::default(), &pwm, &wake, config());

        let steps = controller.run_cycle(&mut board);
        assert_eq!(steps, 33);
        assert_eq!(board.delays.len(), 33);
        assert_eq!(board.idles, 1);
        assert!(!wake.is_armed());
        assert!(!wake.is_pending());
    }

    #[test]
    fn test_sleep_discards_wake_from_before_arming() {
        let pwm: PwmEngine<2> = PwmEngine::new();
        let wake = WakeSignal::new();
        let mut board = MockBoard::new(&pwm, &wake);
        let mut controller =
            ActivityCycleController::new(&FLICKER, SplitMix::default(), &pwm, &wake, config());

        wake.arm();
        wake.signal();
        controller.sleep_until_wake(&mut board);
        // The stale wake was cleared, so the board had to idle once
        assert_eq!(board.idles, 1);
        assert_eq!(controller.phase(), ActivityPhase::Sleeping);
    }
}
