use geo::{Coord, Geometry, LineString, Polygon};
use indexmap::IndexMap;

use crate::array::{GeometryArray, GeometryBuilder};
use crate::scalar::Value;

/// A hashable stand-in for one cell, used for deduplication and counting.
///
/// Two geometries have equal keys exactly when they are structurally identical: same variant,
/// same coordinates in the same order. `-0.0` and `0.0` share a key, as do all NaNs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(u64),
    Utf8(String),
    Geometry(Vec<u64>),
}

impl From<&Value> for KeyPart {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => KeyPart::Null,
            Value::Boolean(v) => KeyPart::Boolean(*v),
            Value::Int64(v) => KeyPart::Int64(*v),
            Value::Float64(v) => KeyPart::Float64(float_bits(*v)),
            Value::Utf8(v) => KeyPart::Utf8(v.clone()),
            Value::Geometry(g) => KeyPart::Geometry(geometry_key(g)),
        }
    }
}

/// The key of a whole row.
pub fn row_key(values: &[Value]) -> Vec<KeyPart> {
    values.iter().map(KeyPart::from).collect()
}

fn float_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        // folds -0.0 into 0.0
        (v + 0.0).to_bits()
    }
}

fn geometry_key(geom: &Geometry) -> Vec<u64> {
    let mut key = Vec::new();
    push_geometry(&mut key, geom);
    key
}

fn push_coord(key: &mut Vec<u64>, c: &Coord) {
    key.push(float_bits(c.x));
    key.push(float_bits(c.y));
}

fn push_line_string(key: &mut Vec<u64>, ls: &LineString) {
    key.push(ls.0.len() as u64);
    ls.0.iter().for_each(|c| push_coord(key, c));
}

fn push_polygon(key: &mut Vec<u64>, p: &Polygon) {
    key.push(p.interiors().len() as u64);
    push_line_string(key, p.exterior());
    p.interiors().iter().for_each(|r| push_line_string(key, r));
}

fn push_geometry(key: &mut Vec<u64>, geom: &Geometry) {
    match geom {
        Geometry::Point(p) => {
            key.push(1);
            push_coord(key, &p.0);
        }
        Geometry::Line(l) => {
            key.push(2);
            push_coord(key, &l.start);
            push_coord(key, &l.end);
        }
        Geometry::LineString(ls) => {
            key.push(3);
            push_line_string(key, ls);
        }
        Geometry::Polygon(p) => {
            key.push(4);
            push_polygon(key, p);
        }
        Geometry::MultiPoint(mp) => {
            key.push(5);
            key.push(mp.0.len() as u64);
            mp.iter().for_each(|p| push_coord(key, &p.0));
        }
        Geometry::MultiLineString(mls) => {
            key.push(6);
            key.push(mls.0.len() as u64);
            mls.iter().for_each(|ls| push_line_string(key, ls));
        }
        Geometry::MultiPolygon(mp) => {
            key.push(7);
            key.push(mp.0.len() as u64);
            mp.iter().for_each(|p| push_polygon(key, p));
        }
        Geometry::GeometryCollection(gc) => {
            key.push(8);
            key.push(gc.0.len() as u64);
            gc.iter().for_each(|g| push_geometry(key, g));
        }
        Geometry::Rect(r) => {
            key.push(9);
            push_coord(key, &r.min());
            push_coord(key, &r.max());
        }
        Geometry::Triangle(t) => {
            key.push(10);
            push_coord(key, &t.0);
            push_coord(key, &t.1);
            push_coord(key, &t.2);
        }
    }
}

/// Deduplication and counting over structurally identical geometries.
pub trait Unique {
    /// Distinct values in order of first appearance. A null is kept once.
    fn unique(&self) -> GeometryArray;

    /// Distinct non-null geometries with their number of occurrences, most frequent first.
    /// Ties keep first-appearance order.
    fn value_counts(&self) -> Vec<(Geometry, usize)>;

    /// `true` for every slot equal to an earlier slot.
    fn duplicated(&self) -> Vec<bool>;
}

impl Unique for GeometryArray {
    fn unique(&self) -> GeometryArray {
        let mut seen: IndexMap<Option<Vec<u64>>, usize> = IndexMap::new();
        for (i, geom) in self.iter().enumerate() {
            seen.entry(geom.map(geometry_key)).or_insert(i);
        }

        let mut builder = GeometryBuilder::with_capacity(seen.len());
        for &i in seen.values() {
            builder.push_geometry(self.get(i).cloned());
        }
        builder.finish()
    }

    fn value_counts(&self) -> Vec<(Geometry, usize)> {
        let mut counts: IndexMap<Vec<u64>, (usize, usize)> = IndexMap::new();
        for (i, geom) in self.iter().enumerate() {
            if let Some(geom) = geom {
                counts.entry(geometry_key(geom)).or_insert((i, 0)).1 += 1;
            }
        }

        let mut out: Vec<(Geometry, usize)> = counts
            .into_values()
            .filter_map(|(i, count)| self.get(i).map(|g| (g.clone(), count)))
            .collect();
        // stable sort keeps first-appearance order between equal counts
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }

    fn duplicated(&self) -> Vec<bool> {
        let mut seen: IndexMap<Option<Vec<u64>>, ()> = IndexMap::new();
        self.iter()
            .map(|geom| seen.insert(geom.map(geometry_key), ()).is_some())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::point;

    fn dup_array() -> GeometryArray {
        GeometryArray::new(vec![
            Some(point!(x: 0., y: 0.).into()),
            Some(point!(x: 1., y: 1.).into()),
            None,
            Some(point!(x: -0., y: 0.).into()),
            None,
        ])
    }

    #[test]
    fn unique_keeps_first_appearance() {
        let uniq = dup_array().unique();
        assert_eq!(
            uniq,
            GeometryArray::new(vec![
                Some(point!(x: 0., y: 0.).into()),
                Some(point!(x: 1., y: 1.).into()),
                None,
            ])
        );
    }

    #[test]
    fn value_counts_most_frequent_first() {
        let expected: Vec<(Geometry, usize)> = vec![
            (point!(x: 0., y: 0.).into(), 2),
            (point!(x: 1., y: 1.).into(), 1),
        ];
        assert_eq!(dup_array().value_counts(), expected);
    }

    #[test]
    fn duplicated_flags_later_copies() {
        assert_eq!(
            dup_array().duplicated(),
            vec![false, false, false, true, true]
        );
    }

    #[test]
    fn variants_do_not_collide() {
        let mp: Geometry = geo::MultiPoint::new(vec![point!(x: 0., y: 0.)]).into();
        let p: Geometry = point!(x: 0., y: 0.).into();
        assert_ne!(geometry_key(&mp), geometry_key(&p));
    }

    #[test]
    fn row_keys() {
        let a = row_key(&[Value::Int64(1), Value::Float64(-0.0)]);
        let b = row_key(&[Value::Int64(1), Value::Float64(0.0)]);
        assert_eq!(a, b);
    }
}
