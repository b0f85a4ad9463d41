//! Meter projection: непрерывное значение → дискретные сегменты
//!
//! Для сегмента `i`:
//! - `Positive`, если i < B_new
//! - `Negative`, если B_new ≤ i < B_old (потерянная ёмкость)
//! - `Neutral` иначе
//!
//! Bucket = `(value as i32) / width` - усечение к нулю, как в authoring-пакете.

/// Цвет сегмента meter'а
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentTone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeterProjection {
    pub segments: usize,
    pub bucket_width: i32,
}

impl Default for MeterProjection {
    fn default() -> Self {
        Self {
            segments: 20,
            bucket_width: 5,
        }
    }
}

impl MeterProjection {
    pub fn new(segments: usize, bucket_width: i32) -> Self {
        Self {
            segments,
            bucket_width: bucket_width.max(1),
        }
    }

    pub fn bucket(&self, value: f32) -> i32 {
        (value as i32) / self.bucket_width
    }

    pub fn tone(&self, index: usize, base: f32, current: f32) -> SegmentTone {
        let old = self.bucket(base) as i64;
        let new = self.bucket(current) as i64;
        let i = index as i64;

        if i < new {
            SegmentTone::Positive
        } else if i < old {
            SegmentTone::Negative
        } else {
            SegmentTone::Neutral
        }
    }

    pub fn project(&self, base: f32, current: f32) -> Vec<SegmentTone> {
        (0..self.segments)
            .map(|i| self.tone(i, base, current))
            .collect()
    }
}
