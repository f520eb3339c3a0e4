use crate::engine::{Placement, PlacementError};

/// Parses a textual placement into a `Placement`.
///
/// The input lists one row index per column, in column order, separated by
/// commas and/or whitespace. The board size is the number of entries.
///
/// # Arguments
/// * `input`: A string such as `"1,3,0,2"` or `"1 3 0 2"`.
///
/// # Returns
/// * `Ok(Placement)` when every token parses as a row index and the result
///   forms a valid placement.
/// * `Err(PlacementError)` when the input is empty, a token is not a
///   non-negative integer, or a row index is out of range for the size.
///
/// # Examples
/// ```
/// use queens_solver::utils::placement_from_str;
///
/// let placement = placement_from_str("1,3,0,2").unwrap();
/// assert_eq!(placement.rows(), &[1, 3, 0, 2]);
///
/// assert!(placement_from_str("1, x, 0").is_err());
/// assert!(placement_from_str("").is_err());
/// ```
pub fn placement_from_str(input: &str) -> Result<Placement, PlacementError> {
    let tokens = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty());

    let mut rows = Vec::new();
    for (index, token) in tokens.enumerate() {
        let row = token
            .parse::<usize>()
            .map_err(|_| PlacementError::InvalidToken {
                token: token.to_string(),
                index,
            })?;
        rows.push(row);
    }

    Placement::new(rows)
}
