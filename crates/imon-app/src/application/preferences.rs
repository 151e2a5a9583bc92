//! Window-preference persistence: placement and font survive restarts.
//!
//! Preferences are stored as small fixed-size binary blobs keyed by name
//! through the [`BlobStore`] port. The contract is deliberately forgiving:
//! a missing key, a size mismatch, or a store failure all degrade to "use
//! defaults" – the next successful save self-heals whatever was stored.
//! Nothing in here is ever fatal to the session.
//!
//! Every preference type holds only fixed-width fields (no `String`, no
//! `Vec`), so its encoded size is a constant and the store can reject a
//! stale blob by length alone before attempting to decode it.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Key under which the window placement blob is stored.
pub const PLACEMENT_KEY: &str = "WindowPlacement";
/// Key under which the font-dialog state blob is stored.
pub const FONT_CHOICE_KEY: &str = "ChooseFont";
/// Key under which the font descriptor blob is stored.
pub const LOG_FONT_KEY: &str = "LogFont";

/// Error type for blob-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The per-user preference directory could not be resolved.
    #[error("preference store unavailable: {0}")]
    Unavailable(String),

    /// A file system I/O error occurred while writing a blob.
    #[error("I/O error writing preference blob: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for the opaque per-user blob store.
///
/// The production implementation writes files under the platform config
/// directory; tests mock this trait.
#[cfg_attr(test, mockall::automock)]
pub trait BlobStore {
    /// Loads the blob stored under `key`.
    ///
    /// Returns `None` when the key is absent, the stored size differs from
    /// `expected_len`, or the underlying store fails – callers treat all
    /// three identically as "no prior value".
    fn load(&self, key: &str, expected_len: usize) -> Option<Vec<u8>>;

    /// Stores `blob` under `key`, replacing any previous value.
    fn save(&self, key: &str, blob: &[u8]) -> Result<(), StoreError>;
}

// ── Preference types ──────────────────────────────────────────────────────────

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementPoint {
    pub x: i32,
    pub y: i32,
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Window geometry and show-state, mirroring the platform placement record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPlacement {
    pub flags: u32,
    pub show_cmd: u32,
    pub min_position: PlacementPoint,
    pub max_position: PlacementPoint,
    pub normal_rect: PlacementRect,
}

/// Font-dialog state worth keeping: chosen size and text colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontChoice {
    /// Point size in tenths of a point, as reported by the dialog.
    pub point_size: i32,
    /// Text colour as 0x00BBGGRR.
    pub color: u32,
}

/// Logical font descriptor, field-for-field the platform layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFont {
    pub height: i32,
    pub width: i32,
    pub escapement: i32,
    pub orientation: i32,
    pub weight: i32,
    pub italic: u8,
    pub underline: u8,
    pub strike_out: u8,
    pub charset: u8,
    pub out_precision: u8,
    pub clip_precision: u8,
    pub quality: u8,
    pub pitch_and_family: u8,
    /// UTF-16 face name, NUL-padded.
    pub face_name: [u16; 32],
}

impl Default for LogFont {
    fn default() -> Self {
        Self {
            height: 0,
            width: 0,
            escapement: 0,
            orientation: 0,
            weight: 0,
            italic: 0,
            underline: 0,
            strike_out: 0,
            charset: 0,
            out_precision: 0,
            clip_precision: 0,
            quality: 0,
            pitch_and_family: 0,
            face_name: [0; 32],
        }
    }
}

// ── Load / save operations ────────────────────────────────────────────────────

/// Constant encoded length of a preference type.
///
/// All fields are fixed-width, so encoding the default value measures every
/// value of the type.
fn encoded_len<T: Serialize + Default>() -> Option<usize> {
    bincode::serialized_size(&T::default()).ok().map(|n| n as usize)
}

fn load_blob<T: Serialize + DeserializeOwned + Default>(
    store: &dyn BlobStore,
    key: &str,
) -> Option<T> {
    let bytes = store.load(key, encoded_len::<T>()?)?;
    bincode::deserialize(&bytes).ok()
}

fn save_blob<T: Serialize>(store: &dyn BlobStore, key: &str, value: &T) -> bool {
    let bytes = match bincode::serialize(value) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(key, "failed to encode preference blob: {e}");
            return false;
        }
    };
    match store.save(key, &bytes) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, "failed to save preference blob: {e}");
            false
        }
    }
}

/// Restores the persisted window placement, if a usable blob exists.
pub fn load_placement(store: &dyn BlobStore) -> Option<WindowPlacement> {
    load_blob(store, PLACEMENT_KEY)
}

/// Persists the window placement. Failure is logged and otherwise ignored.
pub fn save_placement(store: &dyn BlobStore, placement: &WindowPlacement) -> bool {
    save_blob(store, PLACEMENT_KEY, placement)
}

/// Restores the persisted font preference.
///
/// The choice and the descriptor are loaded both-or-neither: a usable font
/// needs the pair, so a missing or mismatched half yields `None`.
pub fn load_font(store: &dyn BlobStore) -> Option<(FontChoice, LogFont)> {
    let choice: FontChoice = load_blob(store, FONT_CHOICE_KEY)?;
    let log_font: LogFont = load_blob(store, LOG_FONT_KEY)?;
    Some((choice, log_font))
}

/// Persists the font pair after a successful dialog.
///
/// The descriptor is only written when the choice saved, mirroring the
/// load-side pairing; returns `true` when the choice was stored.
pub fn save_font(store: &dyn BlobStore, choice: &FontChoice, log_font: &LogFont) -> bool {
    if !save_blob(store, FONT_CHOICE_KEY, choice) {
        return false;
    }
    save_blob(store, LOG_FONT_KEY, log_font);
    true
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_placement() -> WindowPlacement {
        WindowPlacement {
            flags: 0,
            show_cmd: 1,
            min_position: PlacementPoint { x: -1, y: -1 },
            max_position: PlacementPoint { x: -1, y: -1 },
            normal_rect: PlacementRect {
                left: 100,
                top: 80,
                right: 1060,
                bottom: 720,
            },
        }
    }

    fn sample_font() -> (FontChoice, LogFont) {
        let mut face_name = [0u16; 32];
        for (slot, ch) in face_name.iter_mut().zip("Consolas".encode_utf16()) {
            *slot = ch;
        }
        (
            FontChoice {
                point_size: 110,
                color: 0x0000_8000,
            },
            LogFont {
                height: -15,
                weight: 400,
                face_name,
                ..LogFont::default()
            },
        )
    }

    #[test]
    fn test_placement_round_trips_through_the_store() {
        // Arrange: a store that hands back exactly what was saved
        let placement = sample_placement();
        let encoded = bincode::serialize(&placement).unwrap();
        let encoded_for_load = encoded.clone();

        let expected_len = encoded.len();
        let mut store = MockBlobStore::new();
        store
            .expect_save()
            .withf(move |key, blob| key == PLACEMENT_KEY && blob == encoded)
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_load()
            .withf(move |key, len| key == PLACEMENT_KEY && *len == expected_len)
            .times(1)
            .returning(move |_, _| Some(encoded_for_load.clone()));

        // Act / Assert
        assert!(save_placement(&store, &placement));
        assert_eq!(load_placement(&store), Some(placement));
    }

    #[test]
    fn test_missing_placement_yields_none() {
        // Arrange
        let mut store = MockBlobStore::new();
        store.expect_load().returning(|_, _| None);

        // Act / Assert – absence is "use defaults", not an error
        assert_eq!(load_placement(&store), None);
    }

    #[test]
    fn test_save_failure_is_reported_but_not_fatal() {
        // Arrange
        let mut store = MockBlobStore::new();
        store
            .expect_save()
            .returning(|_, _| Err(StoreError::Unavailable("no config dir".into())));

        // Act / Assert
        assert!(!save_placement(&store, &sample_placement()));
    }

    #[test]
    fn test_font_pair_loads_both_or_neither() {
        // Arrange: choice present, descriptor missing
        let (choice, _) = sample_font();
        let encoded_choice = bincode::serialize(&choice).unwrap();

        let mut store = MockBlobStore::new();
        store
            .expect_load()
            .withf(|key, _| key == FONT_CHOICE_KEY)
            .returning(move |_, _| Some(encoded_choice.clone()));
        store
            .expect_load()
            .withf(|key, _| key == LOG_FONT_KEY)
            .returning(|_, _| None);

        // Act / Assert – half a pair is no pair
        assert_eq!(load_font(&store), None);
    }

    #[test]
    fn test_font_pair_round_trips() {
        // Arrange
        let (choice, log_font) = sample_font();
        let encoded_choice = bincode::serialize(&choice).unwrap();
        let encoded_font = bincode::serialize(&log_font).unwrap();

        let mut store = MockBlobStore::new();
        store
            .expect_save()
            .withf(|key, _| key == FONT_CHOICE_KEY)
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_save()
            .withf(|key, _| key == LOG_FONT_KEY)
            .times(1)
            .returning(|_, _| Ok(()));
        let choice_len = encoded_choice.len();
        store
            .expect_load()
            .withf(move |key, len| key == FONT_CHOICE_KEY && *len == choice_len)
            .returning(move |_, _| Some(encoded_choice.clone()));
        let font_len = encoded_font.len();
        store
            .expect_load()
            .withf(move |key, len| key == LOG_FONT_KEY && *len == font_len)
            .returning(move |_, _| Some(encoded_font.clone()));

        // Act / Assert
        assert!(save_font(&store, &choice, &log_font));
        assert_eq!(load_font(&store), Some((choice, log_font)));
    }

    #[test]
    fn test_descriptor_is_not_written_when_choice_save_fails() {
        // Arrange
        let (choice, log_font) = sample_font();
        let mut store = MockBlobStore::new();
        store
            .expect_save()
            .withf(|key, _| key == FONT_CHOICE_KEY)
            .times(1)
            .returning(|_, _| Err(StoreError::Unavailable("disk full".into())));
        store
            .expect_save()
            .withf(|key, _| key == LOG_FONT_KEY)
            .times(0);

        // Act / Assert
        assert!(!save_font(&store, &choice, &log_font));
    }

    #[test]
    fn test_encoded_lengths_are_constant() {
        // Two arbitrary values of each type must encode to the same length
        // the loader expects.
        let (choice, log_font) = sample_font();

        assert_eq!(
            bincode::serialize(&sample_placement()).unwrap().len(),
            encoded_len::<WindowPlacement>().unwrap()
        );
        assert_eq!(
            bincode::serialize(&choice).unwrap().len(),
            encoded_len::<FontChoice>().unwrap()
        );
        assert_eq!(
            bincode::serialize(&log_font).unwrap().len(),
            encoded_len::<LogFont>().unwrap()
        );
    }
}
