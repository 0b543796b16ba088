//! Fair interleaving of several sequences.

/// Iterator taking one element from each live source in turn.
///
/// Sources are visited left to right. A source that runs dry drops out and
/// the remaining ones keep going until every source is exhausted. Elements
/// of one source are never reordered. To start over, build a new value.
///
/// # Examples
///
/// ```
/// use stapler::plan::round_robin::interleave;
///
/// let merged: String = interleave(["ABC".chars(), "D".chars(), "EF".chars()]).collect();
/// assert_eq!(merged, "ADEBFC");
/// ```
#[derive(Debug, Clone)]
pub struct RoundRobin<I> {
    /// `None` once a source is exhausted.
    sources: Vec<Option<I>>,
    /// Index of the source to pull from next.
    cursor: usize,
    /// Number of sources that are not exhausted yet.
    live: usize,
}

impl<I: Iterator> RoundRobin<I> {
    /// Create a round-robin over `sources`.
    pub fn new(sources: impl IntoIterator<Item = I>) -> Self {
        let sources: Vec<Option<I>> = sources.into_iter().map(Some).collect();
        let live = sources.len();
        Self {
            sources,
            cursor: 0,
            live,
        }
    }

    fn advance_cursor(&mut self) {
        self.cursor = (self.cursor + 1) % self.sources.len();
    }
}

impl<I: Iterator> Iterator for RoundRobin<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        while self.live > 0 {
            let slot = &mut self.sources[self.cursor];
            let item = slot.as_mut().and_then(Iterator::next);

            match item {
                Some(item) => {
                    self.advance_cursor();
                    return Some(item);
                }
                None => {
                    if slot.take().is_some() {
                        self.live -= 1;
                    }
                    self.advance_cursor();
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sources
            .iter()
            .flatten()
            .map(Iterator::size_hint)
            .fold((0, Some(0)), |(lo, hi), (l, h)| {
                (
                    lo.saturating_add(l),
                    hi.zip(h).and_then(|(a, b)| a.checked_add(b)),
                )
            })
    }
}

/// Interleave `sources` round-robin.
pub fn interleave<S>(sources: S) -> RoundRobin<<S::Item as IntoIterator>::IntoIter>
where
    S: IntoIterator,
    S::Item: IntoIterator,
{
    RoundRobin::new(sources.into_iter().map(IntoIterator::into_iter))
}
