use crate::history::{History, HistorySample};
use crate::metrics;
use std::time::SystemTime;

/// Per-character correctness state for the target text.
///
/// Marks only move forward within a session: a character goes from
/// `Unmarked` to `Correct`/`Incorrect` (and may flip between the latter two
/// while its word is still active), but nothing resets short of a full
/// session reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Unmarked,
    Correct,
    Incorrect,
}

/// What the UI should do with the input field after a keystroke update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldEffect {
    Retain,
    Clear,
}

/// Live per-tick readout while a session is running.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveMetrics {
    pub elapsed_secs: f64,
    pub wpm: f64,
    pub raw_wpm: f64,
}

/// Read-only end-of-session result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub wpm: f64,
    pub raw_wpm: f64,
    pub accuracy: f64,
}

/// represents one typing run over a fixed target text
#[derive(Debug, Clone)]
pub struct Drill {
    pub target: String,
    chars: Vec<char>,
    words: Vec<String>,
    pub marks: Vec<Mark>,
    pub correct_typed_chars: usize,
    pub raw_typed_chars: usize,
    pub current_word_index: usize,
    pub started_at: Option<SystemTime>,
    pub history: History,
    pub summary: Option<Summary>,
    /// set once a delimiter keystroke has scored the last word, so the
    /// marks-based credit at completion cannot count it a second time
    last_word_scored: bool,
}

impl Drill {
    pub fn new(target: String) -> Self {
        let chars: Vec<char> = target.chars().collect();
        let words: Vec<String> = target.split_whitespace().map(str::to_string).collect();
        let marks = vec![Mark::Unmarked; chars.len()];

        Self {
            target,
            chars,
            words,
            marks,
            correct_typed_chars: 0,
            raw_typed_chars: 0,
            current_word_index: 0,
            started_at: None,
            history: History::default(),
            summary: None,
            last_word_scored: false,
        }
    }

    /// First-keystroke trigger: anchors the session clock exactly once.
    pub fn begin(&mut self, now: SystemTime) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.summary.is_some()
    }

    pub fn target_chars(&self) -> &[char] {
        &self.chars
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn total_non_space_chars(&self) -> usize {
        self.chars.iter().filter(|c| **c != ' ').count()
    }

    pub fn elapsed_secs(&self, now: SystemTime) -> f64 {
        self.started_at
            .and_then(|t| now.duration_since(t).ok())
            .map_or(0.0, |d| d.as_secs_f64())
    }

    /// Character offset where the active word starts within the target.
    pub fn base_position(&self) -> usize {
        self.words[..self.current_word_index]
            .iter()
            .map(|w| w.chars().count() + 1)
            .sum()
    }

    /// Pure live readout; the UI's ticker calls this once a second.
    /// Safe before the first keystroke (everything reads zero).
    pub fn live_metrics(&self, now: SystemTime) -> LiveMetrics {
        let elapsed_secs = self.elapsed_secs(now);

        LiveMetrics {
            elapsed_secs,
            wpm: metrics::words_per_minute(self.correct_typed_chars, elapsed_secs),
            raw_wpm: metrics::words_per_minute(self.raw_typed_chars, elapsed_secs),
        }
    }

    /// Per-keystroke update. `field` is the full current content of the
    /// input field; `is_delimiter` is true when the key just pressed was
    /// the word delimiter (space).
    ///
    /// Returns whether the UI should clear the input field.
    pub fn on_field_change(
        &mut self,
        field: &str,
        is_delimiter: bool,
        now: SystemTime,
    ) -> FieldEffect {
        if self.has_finished() {
            return FieldEffect::Retain;
        }

        if is_delimiter {
            return self.on_word_boundary(field, now);
        }

        let base = self.base_position();

        for (i, c) in field.chars().enumerate() {
            let pos = base + i;
            // Typed past the end of the target: silently ignored
            if pos >= self.chars.len() {
                break;
            }

            self.raw_typed_chars += 1;
            self.marks[pos] = if c == self.chars[pos] {
                Mark::Correct
            } else {
                Mark::Incorrect
            };
        }

        if base + field.chars().count() >= self.chars.len() {
            self.complete(now);
        }

        FieldEffect::Retain
    }

    /// Delimiter branch: snapshot the history, score the finished word,
    /// and advance to the next one. No character-level marking here.
    fn on_word_boundary(&mut self, field: &str, now: SystemTime) -> FieldEffect {
        self.record_history_sample(now);

        let Some(word) = self.words.get(self.current_word_index) else {
            return FieldEffect::Retain;
        };

        let word_len = word.chars().count();
        let typed = field.trim();

        if typed == word.as_str() {
            self.correct_typed_chars += word_len + 1; // word chars + the space
        }
        // Raw counts what was actually typed, however long that was
        self.raw_typed_chars += typed.chars().count() + 1;

        if self.current_word_index < self.words.len() - 1 {
            self.current_word_index += 1;
            return FieldEffect::Clear;
        }

        self.last_word_scored = true;
        FieldEffect::Retain
    }

    /// One `(wpm, raw_wpm)` sample per completed word, taken with the
    /// counters as they stood *before* that word was scored. Skipped when
    /// the clock has not started (nothing to divide by).
    fn record_history_sample(&mut self, now: SystemTime) {
        if self.started_at.is_none() {
            return;
        }

        let elapsed = self.elapsed_secs(now);
        self.history.push(HistorySample::new(
            metrics::words_per_minute(self.correct_typed_chars, elapsed),
            metrics::words_per_minute(self.raw_typed_chars, elapsed),
        ));
    }

    /// The final word normally never sees a delimiter keystroke, so it is
    /// scored here from its marks: one credit per correct character, no
    /// trailing space bonus. Mid-text words keep their `len+1` delimiter
    /// credit, which leaves the last word one char short on purpose.
    ///
    /// A stray space on the last word takes the delimiter path instead;
    /// in that case the word is already scored and gets nothing here.
    fn complete(&mut self, now: SystemTime) {
        if !self.last_word_scored {
            let base = self.base_position();
            let final_word_credit = self.marks[base..]
                .iter()
                .filter(|m| **m == Mark::Correct)
                .count();
            self.correct_typed_chars += final_word_credit;
        }

        self.calc_results(now);
    }

    fn calc_results(&mut self, now: SystemTime) {
        let correct_char_count = self
            .marks
            .iter()
            .zip(self.chars.iter())
            .filter(|(m, c)| **m == Mark::Correct && **c != ' ')
            .count();

        let elapsed = self.elapsed_secs(now);

        self.summary = Some(Summary {
            wpm: metrics::words_per_minute(self.correct_typed_chars, elapsed),
            raw_wpm: metrics::words_per_minute(self.raw_typed_chars, elapsed),
            accuracy: metrics::accuracy(correct_char_count, self.total_non_space_chars()),
        });
    }
}
