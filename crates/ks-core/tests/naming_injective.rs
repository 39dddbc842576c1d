//! Canonical artifact names never collide across distinct work units.

use std::collections::HashSet;
use std::path::PathBuf;

use ks_core::{ArtifactKind, Feed, Gains, Polarization, ScanRange, SpectralWindow, WorkUnit};

fn unit(
    session: u32,
    scans: ScanRange,
    window: SpectralWindow,
    feed: Feed,
    pol: Polarization,
) -> WorkUnit {
    WorkUnit {
        region: "NGC1333".into(),
        session,
        scans,
        source: "Perseus_map_NGC1333-A".into(),
        window,
        feed,
        pol,
        gains: Gains::unity(),
        raw_data_dir: PathBuf::from("/raw"),
        output_root: PathBuf::from("/out"),
    }
}

#[test]
fn names_are_unique_over_the_full_grid() {
    let sessions = [5, 15, 55];
    let ranges = [ScanRange::new(11, 58), ScanRange::new(115, 8), ScanRange::new(1, 158)];

    let mut names = HashSet::new();
    let mut count = 0usize;
    for &session in &sessions {
        for &scans in &ranges {
            for &window in SpectralWindow::all() {
                for feed in Feed::all() {
                    for pol in Polarization::all() {
                        let u = unit(session, scans, window, feed, pol);
                        names.insert(u.canonical_name(ArtifactKind::Fits));
                        count += 1;
                    }
                }
            }
        }
    }

    assert_eq!(count, 3 * 3 * 13 * 7 * 2);
    assert_eq!(names.len(), count);
}

#[test]
fn fits_and_index_share_a_directory_but_not_a_name() {
    let u = unit(
        5,
        ScanRange::new(11, 58),
        SpectralWindow::from_code("3").unwrap(),
        Feed::new(0).unwrap(),
        Polarization::new(0).unwrap(),
    );
    let fits = u.canonical_path(ArtifactKind::Fits);
    let index = u.canonical_path(ArtifactKind::Index);
    assert_eq!(fits.parent(), index.parent());
    assert_ne!(fits, index);
    assert_eq!(fits.parent().unwrap(), PathBuf::from("/out/NGC1333_HNCO_1_0"));
}
