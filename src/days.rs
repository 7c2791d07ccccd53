use chrono::{Duration, NaiveDate};

/// produces: [ start + i days | i <- 0..=(end - start) ]
/// (DOES include "end"; empty when start > end)
#[derive(Clone, Debug)]
pub struct DayIterator {
    current: i64,
    current_back: i64,
    start: NaiveDate,
}

impl DayIterator {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let days = (end - start).num_days() + 1;
        DayIterator {
            current: 0,
            current_back: days.max(0),
            start,
        }
    }

    pub fn length(&self) -> i64 {
        self.current_back - self.current
    }

    fn at(&self, pos: i64) -> NaiveDate {
        self.start + Duration::days(pos)
    }

    fn usize_len(&self) -> usize {
        self.length().max(0) as usize
    }
}

impl Iterator for DayIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.current_back {
            return None;
        }
        let result = self.at(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let l = self.usize_len();
        (l, Some(l))
    }

    fn count(self) -> usize {
        self.usize_len()
    }
}

impl DoubleEndedIterator for DayIterator {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.current >= self.current_back {
            return None;
        }
        self.current_back -= 1;
        Some(self.at(self.current_back))
    }
}

impl ExactSizeIterator for DayIterator {
    fn len(&self) -> usize {
        self.usize_len()
    }
}
