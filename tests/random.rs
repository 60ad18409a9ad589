mod tests {
    use myrtio_flicker_composer::{DEFAULT_SEED, RandomSource, SplitMix};

    #[test]
    fn test_default_seed_sequence() {
        let mut rng = SplitMix::default();
        let bytes: Vec<u8> = (0..8).map(|_| rng.next_byte()).collect();
        assert_eq!(bytes, [145, 190, 248, 113, 113, 195, 224, 133]);
        assert_eq!(SplitMix::default(), SplitMix::new(DEFAULT_SEED));
    }

    #[test]
    fn test_seed_changes_sequence() {
        let mut rng = SplitMix::new(42);
        let bytes: Vec<u8> = (0..8).map(|_| rng.next_byte()).collect();
        assert_eq!(bytes, [189, 40, 71, 88, 9, 222, 55, 204]);
    }

    #[test]
    fn test_next_u64() {
        let mut rng = SplitMix::new(1);
        assert_eq!(rng.next_u64(), 10_451_216_379_200_822_465);
    }

    #[test]
    fn test_mut_ref_is_a_source() {
        fn draw<R: RandomSource>(mut rng: R) -> u8 {
            rng.next_byte()
        }
        let mut rng = SplitMix::default();
        assert_eq!(draw(&mut rng), 145);
        assert_eq!(draw(&mut rng), 190);
    }
}
