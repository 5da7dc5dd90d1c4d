use derive_more::Display;
use std::ops::Range;

/// A half-open index range `[start, end)` owned by one worker.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[display(fmt = "[{}, {})", start, end)]
pub struct Slice {
    pub start: usize,
    pub end: usize,
}

impl Slice {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Splits `[0, total)` into `workers` contiguous slices of `total / workers`
/// items each, the last slice absorbing the remainder.
///
/// `workers` must be at least 1.
pub fn partition(total: usize, workers: usize) -> Vec<Slice> {
    assert!(workers >= 1, "at least one worker is required");
    let per_worker = total / workers;
    (0..workers)
        .map(|i| {
            let start = i * per_worker;
            let end = if i == workers - 1 {
                total
            } else {
                (i + 1) * per_worker
            };
            Slice::new(start, end)
        })
        .collect()
}

/// Cuts `data` into one mutable sub-slice per entry of `slices`.
///
/// `slices` must be ordered, contiguous and cover `data` exactly, which is
/// what `partition(data.len(), _)` returns.
pub fn split_disjoint<'a, T>(mut data: &'a mut [T], slices: &[Slice]) -> Vec<&'a mut [T]> {
    let mut parts = Vec::with_capacity(slices.len());
    let mut offset = 0;
    for slice in slices {
        assert_eq!(slice.start, offset, "slices must be contiguous");
        let (head, tail) = std::mem::take(&mut data).split_at_mut(slice.len());
        parts.push(head);
        data = tail;
        offset = slice.end;
    }
    assert!(data.is_empty(), "slices must cover the whole buffer");
    parts
}
