//! Catalog loading from a CSV file

use super::{Catalog, Descriptor, Track};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const NAME_COLUMN: &str = "name";
const ARTISTS_COLUMN: &str = "artists";

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Could not open catalog file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog {path:?} has no \"{column}\" column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Malformed catalog {path:?} at line {line}: {source}")]
    Malformed {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// Column positions of the fields we read, resolved from the header row.
struct ColumnIndices {
    name: usize,
    artists: usize,
    descriptors: [usize; 4],
}

impl ColumnIndices {
    fn from_headers(headers: &csv::StringRecord, path: &Path) -> Result<Self, CatalogLoadError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| CatalogLoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                })
        };

        let mut descriptors = [0usize; 4];
        for (slot, descriptor) in descriptors.iter_mut().zip(Descriptor::ALL) {
            *slot = find(descriptor.column())?;
        }

        Ok(ColumnIndices {
            name: find(NAME_COLUMN)?,
            artists: find(ARTISTS_COLUMN)?,
            descriptors,
        })
    }
}

/// Coerces a raw cell into a descriptor value. Anything that is not a
/// finite number becomes missing.
fn parse_descriptor(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn malformed(path: &Path, err: csv::Error) -> CatalogLoadError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    CatalogLoadError::Malformed {
        path: path.to_path_buf(),
        line,
        source: err,
    }
}

/// Reads tracks from any CSV source with a header row.
///
/// Short rows are accepted; their absent cells read as missing values.
pub fn read_tracks<R: Read>(reader: R, path: &Path) -> Result<Vec<Track>, CatalogLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| malformed(path, err))?
        .clone();
    let columns = ColumnIndices::from_headers(&headers, path)?;

    let mut tracks = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|err| malformed(path, err))?;
        let cell = |index: usize| record.get(index).unwrap_or_default();
        let descriptor = |d: Descriptor| parse_descriptor(cell(columns.descriptors[d as usize]));

        tracks.push(Track {
            name: cell(columns.name).to_string(),
            artists: cell(columns.artists).to_string(),
            valence: descriptor(Descriptor::Valence),
            energy: descriptor(Descriptor::Energy),
            danceability: descriptor(Descriptor::Danceability),
            tempo: descriptor(Descriptor::Tempo),
        });
    }

    Ok(tracks)
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogLoadError> {
    let path = path.as_ref();
    info!("Loading catalog from {:?}...", path);

    let file = File::open(path).map_err(|source| CatalogLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::new(read_tracks(file, path)?);

    let usable = catalog.usable_tracks_count();
    let unusable = catalog.tracks_count() - usable;
    info!(
        "Catalog has {} tracks ({} usable for mood filtering)",
        catalog.tracks_count(),
        usable
    );
    if unusable > 0 {
        debug!("{} tracks have missing descriptors and will never be recommended", unusable);
    }

    Ok(catalog)
}
