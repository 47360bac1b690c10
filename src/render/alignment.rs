use crate::constants::Degree;

/// Horizontal and vertical alignment of a label relative to its anchor, each in `{-1, 0, 1}`
pub type Alignment = (i8, i8);

/// Upper bound (exclusive) of each compass octant of the track direction, with the alignment
/// putting the label on the left-hand side of the direction of travel
const OCTANTS: [(Degree, Alignment); 8] = [
    (-135. - 22.5, (0, -1)),
    (-90. - 22.5, (1, -1)),
    (-45. - 22.5, (1, 0)),
    (-22.5, (1, 1)),
    (22.5, (0, 1)),
    (45. + 22.5, (-1, 1)),
    (90. + 22.5, (-1, 0)),
    (135. + 22.5, (-1, -1)),
];

/// Alignment of a tick label for a track heading in the direction `theta_deg`.
///
/// A direction falling exactly on an octant boundary belongs to the octant above it.
pub fn label_alignment(theta_deg: Degree) -> Alignment {
    OCTANTS
        .iter()
        .find(|(upper_bound, _)| theta_deg < *upper_bound)
        .map_or((0, -1), |&(_, alignment)| alignment)
}
