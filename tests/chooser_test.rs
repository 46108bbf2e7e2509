#[cfg(test)]
mod chooser_tests {
    use crabselect::{ChoicePolicy, DefaultDeviceIdChooser, Device, FacingMode};

    fn cam(id: &str, label: &str) -> Device {
        Device::video_input(id, label)
    }

    fn choose(
        filtered: &[Device],
        video: &[Device],
        facing: Option<FacingMode>,
    ) -> Option<String> {
        DefaultDeviceIdChooser.choose(filtered, video, facing)
    }

    #[test]
    fn test_smallest_label_wins() {
        let filtered = vec![cam("2", "B"), cam("1", "A")];
        assert_eq!(choose(&filtered, &filtered, None).as_deref(), Some("1"));
    }

    #[test]
    fn test_filtered_beats_fallbacks() {
        let video = vec![cam("front", "Front"), cam("x", "Z back"), cam("y", "A back")];
        let filtered = vec![video[1].clone(), video[2].clone()];
        assert_eq!(
            choose(&filtered, &video, Some(FacingMode::User)).as_deref(),
            Some("y")
        );
    }

    #[test]
    fn test_single_video_device_any_facing_mode() {
        let video = vec![cam("only", "USB Camera")];
        for facing in [None, Some(FacingMode::User), Some(FacingMode::Environment)] {
            assert_eq!(choose(&[], &video, facing).as_deref(), Some("only"));
        }
    }

    #[test]
    fn test_three_devices_user_takes_first() {
        let video = vec![cam("0", ""), cam("1", ""), cam("2", "")];
        assert_eq!(
            choose(&[], &video, Some(FacingMode::User)).as_deref(),
            Some("0")
        );
    }

    #[test]
    fn test_three_devices_environment_takes_last() {
        let video = vec![cam("0", ""), cam("1", ""), cam("2", "")];
        assert_eq!(
            choose(&[], &video, Some(FacingMode::Environment)).as_deref(),
            Some("2")
        );
    }

    #[test]
    fn test_three_devices_unset_takes_last() {
        let video = vec![cam("0", ""), cam("1", ""), cam("2", "")];
        assert_eq!(choose(&[], &video, None).as_deref(), Some("2"));
    }

    #[test]
    fn test_nothing_to_choose() {
        assert_eq!(choose(&[], &[], None), None);
        assert_eq!(choose(&[], &[], Some(FacingMode::User)), None);
    }

    #[test]
    fn test_chooser_does_not_reorder_input() {
        let filtered = vec![cam("2", "B"), cam("1", "A")];
        let before = filtered.clone();
        let _ = choose(&filtered, &filtered, None);
        assert_eq!(filtered, before);
    }
}
