//! Question table parsing.
//!
//! Questions come from a small CSV table with a header row naming `title`,
//! `targets` and `distractors` columns (any column order). The `targets` /
//! `distractors` cells hold pipe-delimited word lists. Rows that end up with
//! zero usable options are dropped; a table with no usable rows degrades to a
//! single built-in fallback question instead of breaking the game.

/// One selectable word on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordOption {
    pub word: String,
    /// Target words belong to the question's list and must NOT be shot.
    pub is_target: bool,
}

/// Immutable question as parsed from the source table.
#[derive(Clone, Debug)]
pub struct Question {
    pub title: String,
    pub options: Vec<WordOption>,
    /// Number of distractors, i.e. required correct shots for this question.
    pub distractor_count: u32,
}

/// Parses the question table. Returns an empty vec for missing headers or a
/// table without usable rows; callers fall back via [`fallback_questions`].
pub fn parse_question_table(csv: &str) -> Vec<Question> {
    let mut lines = csv.lines().filter(|l| !l.trim().is_empty());
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let Some(title_col) = columns.iter().position(|c| *c == "title") else {
        return Vec::new();
    };
    let Some(targets_col) = columns.iter().position(|c| *c == "targets") else {
        return Vec::new();
    };
    let Some(distractors_col) = columns.iter().position(|c| *c == "distractors") else {
        return Vec::new();
    };

    lines
        .filter_map(|line| {
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            // Malformed rows (wrong field count) are dropped, not fatal.
            if cells.len() != columns.len() {
                return None;
            }
            let mut options: Vec<WordOption> = split_words(cells[targets_col])
                .map(|word| WordOption {
                    word,
                    is_target: true,
                })
                .collect();
            let distractors: Vec<WordOption> = split_words(cells[distractors_col])
                .map(|word| WordOption {
                    word,
                    is_target: false,
                })
                .collect();
            let distractor_count = distractors.len() as u32;
            options.extend(distractors);
            if options.is_empty() {
                return None;
            }
            Some(Question {
                title: cells[title_col].to_string(),
                options,
                distractor_count,
            })
        })
        .collect()
}

fn split_words(cell: &str) -> impl Iterator<Item = String> + '_ {
    cell.split('|')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
}

/// Minimal single-question set used when the source table is empty or
/// malformed.
pub fn fallback_questions() -> Vec<Question> {
    vec![Question {
        title: "Shoot the word that does not belong: animals".to_string(),
        options: vec![
            WordOption {
                word: "cat".into(),
                is_target: true,
            },
            WordOption {
                word: "dog".into(),
                is_target: true,
            },
            WordOption {
                word: "teapot".into(),
                is_target: false,
            },
        ],
        distractor_count: 1,
    }]
}

/// Sum of distractors over the whole set: the total number of shots a
/// flawless play-through must land.
pub fn total_distractors(questions: &[Question]) -> u32 {
    questions.iter().map(|q| q.distractor_count).sum()
}
