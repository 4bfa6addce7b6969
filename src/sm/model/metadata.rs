//! Definitions of the descriptive fields of a song.

/// Texts and file paths describing the song, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SongMetadata {
    /// `#TITLE`
    pub title: String,
    /// `#SUBTITLE`
    pub subtitle: String,
    /// `#ARTIST`
    pub artist: String,
    /// `#TITLETRANSLIT`
    pub title_translit: String,
    /// `#SUBTITLETRANSLIT`
    pub subtitle_translit: String,
    /// `#ARTISTTRANSLIT`
    pub artist_translit: String,
    /// `#GENRE`
    pub genre: String,
    /// `#CREDIT`
    pub credit: String,
    /// `#BANNER`
    pub banner: String,
    /// `#BACKGROUND`
    pub background: String,
    /// `#LYRICSPATH`
    pub lyrics_path: String,
    /// `#CDTITLE`
    pub cd_title: String,
    /// `#MUSIC`
    pub music: String,
}

impl SongMetadata {
    /// Returns the field for the metadata tag name in uppercase, or `None` if the tag is not a metadata tag.
    pub fn field_mut(&mut self, tag: &str) -> Option<&mut String> {
        let field = match tag {
            "TITLE" => &mut self.title,
            "SUBTITLE" => &mut self.subtitle,
            "ARTIST" => &mut self.artist,
            "TITLETRANSLIT" => &mut self.title_translit,
            "SUBTITLETRANSLIT" => &mut self.subtitle_translit,
            "ARTISTTRANSLIT" => &mut self.artist_translit,
            "GENRE" => &mut self.genre,
            "CREDIT" => &mut self.credit,
            "BANNER" => &mut self.banner,
            "BACKGROUND" => &mut self.background,
            "LYRICSPATH" => &mut self.lyrics_path,
            "CDTITLE" => &mut self.cd_title,
            "MUSIC" => &mut self.music,
            _ => return None,
        };
        Some(field)
    }
}

/// The tempo shown on the song selection. `#DISPLAYBPM`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayBpm {
    /// Shows the actual tempo range of the timing data.
    #[default]
    Actual,
    /// Shows the specified range. `min` equals `max` for a single value.
    Specified {
        /// The lower end.
        min: f64,
        /// The upper end.
        max: f64,
    },
    /// Shows a random value. `*`
    Random,
}

/// Where the song is offered. `#SELECTABLE`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selectable {
    /// In the song list.
    #[default]
    Yes,
    /// Nowhere.
    No,
    /// Only by the roulette.
    Roulette,
    /// Only in extra stages. `ES`
    ExtraStage,
    /// Only in the one more extra stage. `OMES`
    OneMoreExtraStage,
}

impl Selectable {
    /// Looks up the value case-insensitively.
    #[must_use]
    pub fn lookup(value: &str) -> Option<Self> {
        let selectable = match value.trim().to_ascii_uppercase().as_str() {
            "YES" => Self::Yes,
            "NO" => Self::No,
            "ROULETTE" => Self::Roulette,
            "ES" => Self::ExtraStage,
            "OMES" => Self::OneMoreExtraStage,
            _ => return None,
        };
        Some(selectable)
    }
}
