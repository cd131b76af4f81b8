use voice_core::axis::{AxisLimit, AxisRange, Scale};
use voice_core::config::AnalyzerConfig;
use voice_core::formant::{self, SegmentPeak};
use voice_core::{analyze, AnalysisOutput, Analyzer, CompassPoint, MagnitudeBuffer, PITCH_AXIS, RESONANCE_AXIS};

const SAMPLE_RATE: f32 = 44_100.0;

fn gaussian(len: usize, center: f32, width: f32, height: f32) -> Vec<f32> {
    (0..len)
        .map(|i| height * (-((i as f32 - center) / width).powi(2)).exp())
        .collect()
}

#[test]
fn silence_produces_no_estimates() {
    let output = analyze(&vec![0.0; 1024], SAMPLE_RATE);
    assert_eq!(output.pitch_hz, None);
    assert_eq!(output.resonance_value, None);
}

#[test]
fn dominant_bin_sets_the_pitch() {
    let mut magnitudes = vec![0.0; 1024];
    magnitudes[100] = 0.9;

    let output = analyze(&magnitudes, SAMPLE_RATE);
    let bin_width = SAMPLE_RATE / 2.0 / 1024.0;
    let pitch = output.pitch_hz.expect("spike above threshold");
    assert!((pitch - 100.0 * bin_width).abs() <= bin_width, "pitch was {pitch}");
    assert!((pitch - 2153.3).abs() < 1.0);
}

#[test]
fn single_hump_in_peak_sequence_locates_the_formant() {
    let values = [0.05, 0.1, 0.2, 0.35, 0.5, 0.8, 0.5, 0.35, 0.2, 0.1];
    let peaks: Vec<SegmentPeak> = values
        .iter()
        .enumerate()
        .map(|(i, &value)| SegmentPeak { index: i * 10, value })
        .collect();

    let formants = formant::select_formants(&peaks, 1, 40);
    assert_eq!(formants.len(), 1);
    assert!((formants[0].position - 50.0).abs() < 1e-2);

    let magnitudes = vec![0.0; 1024];
    let buffer = MagnitudeBuffer::new(&magnitudes, SAMPLE_RATE);
    let formant_hz = buffer.bin_to_hz(formants[0].position);
    let length = formant::vocal_tract_length_cm(formant_hz, 343.0).unwrap();
    assert!((length - 343.0 / (2.0 * formant_hz) * 100.0).abs() < 1e-4);
}

#[test]
fn voice_like_spectrum_lands_on_the_compass() {
    // broad hump for the formant, narrow spike for the pitch
    let mut magnitudes = gaussian(1024, 60.0, 10.0, 0.6);
    magnitudes[9] = 0.95;

    let analyzer = Analyzer::new(AnalyzerConfig::default());
    let output = analyzer.analyze(&MagnitudeBuffer::with_bin_count(&magnitudes, SAMPLE_RATE, 1024));

    let pitch = output.pitch_hz.unwrap();
    assert!((pitch - 9.0 * SAMPLE_RATE / 2048.0).abs() < SAMPLE_RATE / 2048.0);
    assert!(output.resonance_value.is_some());

    let point = CompassPoint::locate(&output, 400.0, 400.0);
    assert!((0.0..=400.0).contains(&point.x));
    assert!((0.0..=400.0).contains(&point.y));
}

#[test]
fn resonance_axis_inverts_its_limits() {
    let short = AnalysisOutput { pitch_hz: None, resonance_value: Some(11.0) };
    let long = AnalysisOutput { pitch_hz: None, resonance_value: Some(18.0) };

    assert_eq!(RESONANCE_AXIS.ratio_along_range(&short, true), 1.0);
    assert_eq!(RESONANCE_AXIS.ratio_along_range(&long, true), 0.0);
    assert_eq!(RESONANCE_AXIS.range().min().displayed_val(), 0.0);
    assert_eq!(RESONANCE_AXIS.range().max().calc_limit(), 18.0);
}

#[test]
fn pitch_axis_coordinate_matches_range_math() {
    let output = AnalysisOutput { pitch_hz: Some(120.0), resonance_value: None };
    let coordinate = PITCH_AXIS.coordinate(&output);

    assert_eq!(coordinate.raw, 120.0);
    assert_eq!(coordinate.value_along_range, 120.0);
    assert!((coordinate.ratio - 70.0 / 350.0).abs() < 1e-6);
}

#[test]
fn direct_linear_round_trip() {
    let range = AxisRange::new(AxisLimit::new(-3.0), AxisLimit::new(12.0), Scale::Linear);
    for ratio in [0.0, 0.2, 0.5, 0.75, 1.0] {
        let raw = range.value_along_range_inverse(ratio);
        assert!((range.ratio_along_range(raw, true) - ratio).abs() < 1e-5);
    }
}
