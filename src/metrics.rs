/// Standard WPM: five characters count as one word.
///
/// Clamps to 0.0 when no time has elapsed so a session finished inside the
/// first clock tick never divides by zero.
pub fn words_per_minute(typed_chars: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }

    (typed_chars as f64 / 5.0) / (elapsed_secs / 60.0)
}

/// Percentage of non-space target characters that ended up marked correct.
/// 0.0 for an empty target rather than NaN.
pub fn accuracy(correct_chars: usize, total_chars: usize) -> f64 {
    if total_chars == 0 {
        return 0.0;
    }

    (correct_chars as f64 / total_chars as f64) * 100.0
}
