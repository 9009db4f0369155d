use serde::{Deserialize, Serialize};

/// How the status line presents the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    /// One symbol at a time, advancing on every rotate tick
    #[default]
    Rotate,
    /// Every symbol in one scrolling line
    Marquee,
}

impl DisplayMode {
    pub fn from_marquee_flag(is_marquee: bool) -> Self {
        if is_marquee {
            Self::Marquee
        } else {
            Self::Rotate
        }
    }

    pub fn is_marquee(self) -> bool {
        self == Self::Marquee
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Rotate => Self::Marquee,
            Self::Marquee => Self::Rotate,
        }
    }
}

/// Semantic text colors; the sink maps them to whatever its surface offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextColor {
    Success,
    Failure,
    Secondary,
}

/// A piece of text drawn in a single color (or the default color).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledRun {
    pub text: String,
    pub color: Option<TextColor>,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: TextColor) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

/// What the render sink should show next.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    pub runs: Vec<StyledRun>,
    /// Hint that digits should keep a fixed width so scrolling text does not jitter
    pub monospaced_digits: bool,
}

impl RenderOutput {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            runs: vec![StyledRun::plain(text)],
            monospaced_digits: false,
        }
    }

    pub fn single(run: StyledRun) -> Self {
        Self {
            runs: vec![run],
            monospaced_digits: false,
        }
    }

    /// Concatenated text of every run, without styling.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}
