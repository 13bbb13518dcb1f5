/// Returns the index of the maximum value approved by `filter` in the slice
/// `vec` if found, [`None`] otherwise.
///
/// In case of ties, the smallest index is returned.
///
/// # Arguments
/// - `vec`: the slice of elements.
/// - `filter`: a closure that takes as arguments the index of the element and
///   the element itself and returns `true` if the element may be selected.
///
/// # Examples
/// ```
/// # use mesp_algo::utils::math::filtered_argmax;
/// let v = vec![1, 2, 5, 4, 4];
/// let index = filtered_argmax(&v, |_, element| element < 5);
/// assert_eq!(index, Some(3));
/// ```
pub fn filtered_argmax<T: PartialOrd + Copy, F: Fn(usize, T) -> bool>(
    vec: &[T],
    filter: F,
) -> Option<usize> {
    let mut argmax: Option<(usize, T)> = None;
    for (i, &elem) in vec.iter().enumerate() {
        if !filter(i, elem) {
            continue;
        }
        match argmax {
            Some((_, max)) if elem <= max => {}
            _ => argmax = Some((i, elem)),
        }
    }
    argmax.map(|(i, _)| i)
}
