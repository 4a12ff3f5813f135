//! Test fixture creation
//!
//! Writes the CSV catalog every test server loads.

use super::constants::*;
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

/// Creates a temporary CSV catalog.
///
/// Contents:
/// - 2 Gym tracks (energy > 0.85, tempo > 120)
/// - 1 Angry track (energy > 0.85, valence < 0.40)
/// - 7 Happy tracks (valence > 0.75, energy > 0.60)
/// - 2 incomplete rows that are never recommended
///
/// No track qualifies as Party.
pub fn create_test_catalog() -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "id,name,artists,valence,energy,danceability,tempo,popularity")?;
    writeln!(file, "1,{},The Lifters,0.50,0.95,0.60,140.0,71", GYM_TRACK_OFFICIAL)?;
    writeln!(file, "2,{},The Lifters,0.45,0.90,0.55,128.0,40", GYM_TRACK_LIVE_ONLY)?;
    writeln!(file, "3,{},Static Noise,0.20,0.93,0.50,100.0,12", ANGRY_TRACK)?;
    for i in 1..=HAPPY_TRACKS_COUNT {
        writeln!(
            file,
            "{},{} {},Bright Band,0.{},0.70,0.60,118.0,50",
            3 + i,
            HAPPY_TRACK_PREFIX,
            i,
            80 + i
        )?;
    }
    writeln!(file, "11,{},Ghost,0.50,0.99,0.60,,10", INCOMPLETE_TRACKS[0])?;
    writeln!(file, "12,{},Ghost,n/a,0.99,0.60,150.0,10", INCOMPLETE_TRACKS[1])?;
    file.flush()?;

    Ok(file)
}
