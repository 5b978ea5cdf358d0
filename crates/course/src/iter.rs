use std::fmt::Display;

use tracing::warn;

/// Iterator adapters
pub(crate) trait IteratorExt {
    /// Creates an iterator that yields the successful elements and skips
    /// the failed ones, logging a warning for each skipped element.
    #[inline]
    fn skip_malformed<'a, T, E>(self, route_id: &'a str, unit: &'static str) -> SkipMalformed<'a, Self>
    where
        Self: Iterator<Item = Result<T, E>> + Sized,
        E: Display,
    {
        SkipMalformed::new(self, route_id, unit)
    }
}

impl<I: Iterator> IteratorExt for I {}

/// An iterator that drops the malformed elements of `iter`.
///
/// This `struct` is created by the [`IteratorExt::skip_malformed`] method on [`IteratorExt`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Debug, Clone)]
pub(crate) struct SkipMalformed<'a, I> {
    iter: I,
    route_id: &'a str,
    unit: &'static str,
    index: usize,
}

impl<'a, I> SkipMalformed<'a, I> {
    pub(in crate::iter) fn new(iter: I, route_id: &'a str, unit: &'static str) -> SkipMalformed<'a, I> {
        SkipMalformed {
            iter,
            route_id,
            unit,
            index: 0,
        }
    }
}

impl<I, T, E> Iterator for SkipMalformed<'_, I>
where
    I: Iterator<Item = Result<T, E>>,
    E: Display,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let index = self.index;
            self.index += 1;

            match self.iter.next()? {
                Ok(item) => return Some(item),
                Err(error) => {
                    warn!(
                        route = self.route_id,
                        index,
                        "skipping malformed {unit}: {error}",
                        unit = self.unit
                    );
                    continue;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_malformed_yields_only_successful_elements() {
        let items: Vec<Result<u32, String>> =
            vec![Ok(1), Err(String::from("bad")), Ok(2), Err(String::from("worse")), Ok(3)];

        let actual: Vec<u32> = items.into_iter().skip_malformed("r1", "entry").collect();

        assert_eq!(actual, [1, 2, 3]);
    }
}
