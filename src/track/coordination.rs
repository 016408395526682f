use crate::StrError;

/// Group id of atoms eligible for tip detection (clamped edges use other groups)
pub const TIP_SEARCH_GROUP: usize = 1;

/// Locates the crack tip from broken coordination
///
/// Scans for under-coordinated atoms (fewer neighbors than `bulk_coordination`)
/// on either side of the crack plane at mid cell height and returns the indices
/// of the right-most ones `(above, below)`. These two atoms carry the last
/// broken bond, so their position marks the tip in a dynamical simulation.
///
/// Atoms outside [TIP_SEARCH_GROUP] are skipped, which excludes the clamped
/// boundary layers whose coordination is broken by construction.
pub fn find_tip_coordination(
    x: &[f64],
    y: &[f64],
    cell_height: f64,
    n_neighbors: &[usize],
    groups: &[usize],
    bulk_coordination: usize,
) -> Result<(usize, usize), StrError> {
    if x.len() != y.len() || x.len() != n_neighbors.len() || x.len() != groups.len() {
        return Err("positions, coordination, and group arrays must have the same length");
    }
    let mid = cell_height / 2.0;
    let mut above: Option<usize> = None;
    let mut below: Option<usize> = None;
    for i in 0..x.len() {
        if n_neighbors[i] >= bulk_coordination || groups[i] != TIP_SEARCH_GROUP {
            continue;
        }
        if y[i] > mid {
            if above.map_or(true, |j| x[i] > x[j]) {
                above = Some(i);
            }
        } else if y[i] < mid {
            // atoms exactly at mid height belong to neither crack face
            if below.map_or(true, |j| x[i] > x[j]) {
                below = Some(i);
            }
        }
    }
    match (above, below) {
        (Some(a), Some(b)) => Ok((a, b)),
        (None, _) => Err("no under-coordinated atom found above the crack plane"),
        (_, None) => Err("no under-coordinated atom found below the crack plane"),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::find_tip_coordination;

    #[test]
    fn find_tip_coordination_works() {
        // crack faces along y = 10 with the tip between atoms 2 and 5
        let x = vec![0.0, 4.0, 8.0, 0.0, 4.0, 8.0, 12.0];
        let y = vec![11.0, 11.0, 11.0, 9.0, 9.0, 9.0, 9.0];
        let nn = vec![3, 3, 3, 3, 3, 3, 4];
        let groups = vec![1; 7];
        let (above, below) = find_tip_coordination(&x, &y, 20.0, &nn, &groups, 4).unwrap();
        assert_eq!(above, 2);
        assert_eq!(below, 5);
    }

    #[test]
    fn find_tip_coordination_skips_atoms_at_mid_height() {
        let x = vec![0.0, 0.0, 12.0];
        let y = vec![11.0, 9.0, 10.0];
        let nn = vec![3, 3, 3];
        let groups = vec![1, 1, 1];
        let (above, below) = find_tip_coordination(&x, &y, 20.0, &nn, &groups, 4).unwrap();
        assert_eq!(above, 0);
        assert_eq!(below, 1);
    }

    #[test]
    fn find_tip_coordination_skips_other_groups() {
        let x = vec![0.0, 10.0, 0.0, 10.0];
        let y = vec![11.0, 11.0, 9.0, 9.0];
        let nn = vec![3, 3, 3, 3];
        // the right-most atoms belong to the clamped boundary
        let groups = vec![1, 0, 1, 0];
        let (above, below) = find_tip_coordination(&x, &y, 20.0, &nn, &groups, 4).unwrap();
        assert_eq!(above, 0);
        assert_eq!(below, 2);
    }

    #[test]
    fn find_tip_coordination_captures_missing_tip() {
        let x = vec![0.0, 0.0];
        let y = vec![11.0, 9.0];
        let groups = vec![1, 1];
        assert_eq!(
            find_tip_coordination(&x, &y, 20.0, &[4, 3], &groups, 4).err(),
            Some("no under-coordinated atom found above the crack plane")
        );
        assert_eq!(
            find_tip_coordination(&x, &y, 20.0, &[3, 4], &groups, 4).err(),
            Some("no under-coordinated atom found below the crack plane")
        );
        assert_eq!(
            find_tip_coordination(&x, &y, 20.0, &[3], &groups, 4).err(),
            Some("positions, coordination, and group arrays must have the same length")
        );
    }
}
