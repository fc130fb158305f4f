//! Reference-sample validation against real WAV files on disk.

mod common;

use common::{write_silence, write_tone};
use voice_assistant_tts::domain::SampleRejection;
use voice_assistant_tts::{SampleValidator, ValidationPolicy};

fn validator() -> SampleValidator {
    SampleValidator::new(ValidationPolicy::CLONING)
}

#[test]
fn well_formed_sample_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.wav");
    write_tone(&path, 4.0, 22_050, 0.6);

    let verdict = validator().validate(&path);
    assert!(verdict.is_accepted(), "{verdict}");
    let info = verdict.info().unwrap();
    assert_eq!(info.sample_rate, 22_050);
    assert_eq!(info.channels, 1);
    assert!((info.duration_secs - 4.0).abs() < 0.01);
    assert!(info.peak > 0.5);
}

#[test]
fn missing_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let verdict = validator().validate(dir.path().join("nope.wav"));
    assert!(matches!(verdict.rejection(), Some(SampleRejection::Missing(_))));
}

#[test]
fn non_wav_extension_is_rejected_before_decoding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"not an audio file").unwrap();

    let verdict = validator().validate(&path);
    assert_eq!(
        verdict.rejection(),
        Some(&SampleRejection::UnsupportedFormat {
            extension: "txt".into()
        })
    );
}

#[test]
fn uppercase_extension_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("REFERENCE.WAV");
    write_tone(&path, 3.5, 16_000, 0.3);
    assert!(validator().is_valid(&path));
}

#[test]
fn empty_wav_file_is_undecodable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.wav");
    std::fs::File::create(&path).unwrap();

    let verdict = validator().validate(&path);
    assert!(matches!(
        verdict.rejection(),
        Some(SampleRejection::Undecodable(_))
    ));
}

#[test]
fn short_samples_are_rejected_at_every_length_below_minimum() {
    let dir = tempfile::tempdir().unwrap();
    for (i, secs) in [0.1f32, 1.0, 2.0, 2.9].into_iter().enumerate() {
        let path = dir.path().join(format!("short_{i}.wav"));
        write_tone(&path, secs, 16_000, 0.8);
        let verdict = validator().validate(&path);
        assert!(
            matches!(verdict.rejection(), Some(SampleRejection::TooShort { .. })),
            "{secs}s: {verdict}"
        );
    }
}

#[test]
fn quick_policy_accepts_what_cloning_policy_rejects() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prompt.wav");
    write_tone(&path, 1.5, 16_000, 0.8);

    assert!(!validator().is_valid(&path));
    assert!(SampleValidator::new(ValidationPolicy::QUICK).is_valid(&path));
}

#[test]
fn low_sample_rate_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phone.wav");
    write_tone(&path, 5.0, 8_000, 0.8);

    let verdict = validator().validate(&path);
    assert_eq!(
        verdict.rejection(),
        Some(&SampleRejection::SampleRateTooLow {
            sample_rate: 8_000,
            minimum: 16_000
        })
    );
}

#[test]
fn duration_is_checked_before_sample_rate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short_phone.wav");
    write_tone(&path, 1.0, 8_000, 0.8);

    let verdict = validator().validate(&path);
    assert!(matches!(
        verdict.rejection(),
        Some(SampleRejection::TooShort { .. })
    ));
}

#[test]
fn silence_is_rejected_regardless_of_duration() {
    let dir = tempfile::tempdir().unwrap();
    for secs in [3.0f32, 5.0, 30.0] {
        let path = dir.path().join(format!("silence_{secs}.wav"));
        write_silence(&path, secs, 16_000);
        let verdict = validator().validate(&path);
        assert!(
            matches!(verdict.rejection(), Some(SampleRejection::Silent { .. })),
            "{secs}s: {verdict}"
        );
    }
}

#[test]
fn near_silent_sample_below_threshold_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hiss.wav");
    write_tone(&path, 4.0, 16_000, 0.005);
    assert!(matches!(
        validator().validate(&path).rejection(),
        Some(SampleRejection::Silent { .. })
    ));
}

#[test]
fn float_stereo_sample_is_measured_across_channels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stereo.wav");
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 48_000,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for _ in 0..(48_000 * 3 + 100) {
        writer.write_sample(0.0f32).unwrap();
        writer.write_sample(-0.25f32).unwrap();
    }
    writer.finalize().unwrap();

    let verdict = validator().validate(&path);
    let info = verdict.info().copied().unwrap();
    assert_eq!(info.channels, 2);
    assert!(info.duration_secs >= 3.0);
    assert!((info.peak - 0.25).abs() < 1e-6);
}

#[test]
fn sample_exactly_on_every_threshold_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edge.wav");
    let policy = ValidationPolicy::CLONING;
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: policy.min_sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    // 48 000 frames at 16 kHz is exactly 3 s; every sample sits on the silence threshold.
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..48_000 {
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        writer.write_sample(sign * policy.silence_threshold).unwrap();
    }
    writer.finalize().unwrap();

    let verdict = SampleValidator::new(policy).validate(&path);
    assert!(verdict.is_accepted(), "{verdict}");
    let info = verdict.info().copied().unwrap();
    assert_eq!(info.duration_secs, policy.min_duration_secs);
    assert_eq!(info.peak, policy.silence_threshold);
}
