use keydrill::history::HistorySample;

/// Compute X (completed words) and Y (WPM) bounds for the results chart.
/// Y covers both the net and raw series; raw is never below net but an
/// empty history still yields sane axes.
pub fn compute_chart_params(samples: &[HistorySample]) -> (f64, f64) {
    let mut highest_wpm = 0.0;
    for s in samples {
        if s.wpm > highest_wpm {
            highest_wpm = s.wpm;
        }
        if s.raw_wpm > highest_wpm {
            highest_wpm = s.raw_wpm;
        }
    }

    let mut overall_words = samples.len() as f64;
    if overall_words < 1.0 {
        overall_words = 1.0;
    }

    (overall_words, highest_wpm.round())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_chart_params_empty() {
        let (x, y) = compute_chart_params(&[]);
        assert_eq!(x, 1.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_compute_chart_params_covers_raw_series() {
        let samples = [
            HistorySample::new(40.0, 55.0),
            HistorySample::new(45.0, 52.0),
        ];
        let (x, y) = compute_chart_params(&samples);
        assert_eq!(x, 2.0);
        assert_eq!(y, 55.0);
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
