/// Typewriter dialog queue. One line shows at a time; its first character
/// is visible on the tick it appears, and the advance key first snaps the
/// reveal to the full line, then pops it.
#[derive(Debug, Default)]
pub(crate) struct Dialog {
    lines: VecDeque<DialogLine>,
    revealed_chars: usize,
    reveal_timer: f32,
    open: bool,
}

impl Dialog {
    pub(crate) fn open(&mut self, lines: &[DialogLine]) {
        if lines.is_empty() {
            return;
        }
        self.lines = lines.iter().cloned().collect();
        self.arm_current_line();
        self.open = true;
    }

    /// Starts the reveal for the line at the front of the queue.
    fn arm_current_line(&mut self) {
        self.revealed_chars = self
            .lines
            .front()
            .map_or(0, |line| line.text.chars().count().min(1));
        self.reveal_timer = 0.0;
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn current_line(&self) -> Option<&DialogLine> {
        if self.open {
            self.lines.front()
        } else {
            None
        }
    }

    pub(crate) fn speaker(&self) -> Option<&str> {
        self.current_line().map(|line| line.speaker.as_str())
    }

    pub(crate) fn update(&mut self, delta: f32) {
        if !self.open {
            return;
        }
        let Some(line) = self.lines.front() else {
            self.open = false;
            return;
        };

        let total_chars = line.text.chars().count();
        if self.revealed_chars >= total_chars {
            return;
        }

        self.reveal_timer += delta;
        while self.reveal_timer >= DIALOG_REVEAL_INTERVAL_SECONDS
            && self.revealed_chars < total_chars
        {
            self.reveal_timer -= DIALOG_REVEAL_INTERVAL_SECONDS;
            self.revealed_chars += 1;
        }
    }

    pub(crate) fn advance(&mut self) {
        if !self.open {
            return;
        }
        let Some(line) = self.lines.front() else {
            self.open = false;
            return;
        };

        let total_chars = line.text.chars().count();
        if self.revealed_chars < total_chars {
            self.revealed_chars = total_chars;
            return;
        }

        self.lines.pop_front();
        self.arm_current_line();
        if self.lines.is_empty() {
            self.open = false;
        }
    }

    pub(crate) fn revealed_text(&self) -> String {
        match self.current_line() {
            Some(line) => line.text.chars().take(self.revealed_chars).collect(),
            None => String::new(),
        }
    }

    /// The revealed prefix wrapped for the dialog box.
    pub(crate) fn revealed_rows(&self) -> Vec<String> {
        wrap_rows(
            &self.revealed_text(),
            DIALOG_ROW_MAX_CHARS,
            DIALOG_MAX_ROWS,
        )
    }

}

/// Word-wraps `text` into at most `max_rows` rows of at most `max_chars`
/// characters. Words longer than a row are hard-split.
fn wrap_rows(text: &str, max_chars: usize, max_rows: usize) -> Vec<String> {
    let mut rows: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;

        while word.chars().count() > max_chars {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                if rows.len() == max_rows {
                    return rows;
                }
            }
            let split_at = word
                .char_indices()
                .nth(max_chars)
                .map(|(index, _)| index)
                .unwrap_or(word.len());
            rows.push(word[..split_at].to_string());
            if rows.len() == max_rows {
                return rows;
            }
            word = &word[split_at..];
        }
        if word.is_empty() {
            continue;
        }

        let current_chars = current.chars().count();
        let word_chars = word.chars().count();
        let candidate_chars = if current.is_empty() {
            word_chars
        } else {
            current_chars + 1 + word_chars
        };

        if candidate_chars <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            rows.push(std::mem::take(&mut current));
            if rows.len() == max_rows {
                return rows;
            }
            current.push_str(word);
        }
    }

    if !current.is_empty() && rows.len() < max_rows {
        rows.push(current);
    }
    rows
}
