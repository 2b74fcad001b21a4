use geo::{
    BooleanOps, Coord, Geometry, GeometryCollection, Intersects, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

use crate::array::GeometryArray;

/// Merge geometries into one.
///
/// Areal members are dissolved with a boolean union. Points are deduplicated, sorted by
/// coordinate, and dropped when they fall on an areal member. Linear members are deduplicated
/// but not noded against each other. An empty input yields an empty `GEOMETRYCOLLECTION`.
pub fn unary_union<'a>(geoms: impl IntoIterator<Item = &'a Geometry>) -> Geometry {
    let mut parts = Parts::default();
    for geom in geoms {
        parts.push(geom);
    }
    parts.finish()
}

/// Merge all non-null geometries of an array into one.
pub trait UnaryUnion {
    fn unary_union(&self) -> Geometry;
}

impl UnaryUnion for GeometryArray {
    fn unary_union(&self) -> Geometry {
        unary_union(self.iter_valid())
    }
}

#[derive(Default)]
struct Parts {
    points: Vec<Coord>,
    lines: Vec<LineString>,
    polygons: Vec<Polygon>,
}

impl Parts {
    fn push(&mut self, geom: &Geometry) {
        match geom {
            Geometry::Point(p) => self.points.push(p.0),
            Geometry::MultiPoint(mp) => self.points.extend(mp.iter().map(|p| p.0)),
            Geometry::Line(l) => self.lines.push(LineString::new(vec![l.start, l.end])),
            Geometry::LineString(ls) => self.lines.push(ls.clone()),
            Geometry::MultiLineString(mls) => self.lines.extend(mls.iter().cloned()),
            Geometry::Polygon(p) => self.polygons.push(p.clone()),
            Geometry::MultiPolygon(mp) => self.polygons.extend(mp.iter().cloned()),
            Geometry::Rect(r) => self.polygons.push(r.to_polygon()),
            Geometry::Triangle(t) => self.polygons.push(t.to_polygon()),
            Geometry::GeometryCollection(gc) => gc.iter().for_each(|g| self.push(g)),
        }
    }

    fn finish(self) -> Geometry {
        let area = self
            .polygons
            .into_iter()
            .filter(|p| !p.exterior().0.is_empty())
            .fold(None::<MultiPolygon>, |acc, p| {
                let p = MultiPolygon::new(vec![p]);
                Some(match acc {
                    Some(acc) => acc.union(&p),
                    None => p,
                })
            });

        let mut points = self.points;
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points.dedup();
        if let Some(area) = &area {
            points.retain(|c| !area.intersects(&Point(*c)));
        }

        let mut lines: Vec<LineString> = Vec::with_capacity(self.lines.len());
        for line in self.lines {
            if !line.0.is_empty() && !lines.contains(&line) {
                lines.push(line);
            }
        }

        let mut out: Vec<Geometry> = Vec::with_capacity(3);
        match points.len() {
            0 => {}
            1 => out.push(Point(points[0]).into()),
            _ => out.push(MultiPoint::new(points.into_iter().map(Point).collect()).into()),
        }
        match lines.len() {
            0 => {}
            1 => out.extend(lines.pop().map(Geometry::LineString)),
            _ => out.push(MultiLineString::new(lines).into()),
        }
        if let Some(mut area) = area {
            if area.0.len() == 1 {
                out.extend(area.0.pop().map(Geometry::Polygon));
            } else if !area.0.is_empty() {
                out.push(area.into());
            }
        }

        if out.len() == 1 {
            out.remove(0)
        } else {
            Geometry::GeometryCollection(GeometryCollection::new_from(out))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::{point, polygon, Area};

    #[test]
    fn points_merge_into_sorted_multipoint() {
        let geoms: Vec<Geometry> = vec![
            point!(x: 2., y: 2.).into(),
            point!(x: 0., y: 0.).into(),
            point!(x: 2., y: 2.).into(),
        ];
        assert_eq!(
            unary_union(&geoms),
            Geometry::MultiPoint(MultiPoint::new(vec![
                point!(x: 0., y: 0.),
                point!(x: 2., y: 2.)
            ]))
        );
    }

    #[test]
    fn single_point_stays_point() {
        let geoms: Vec<Geometry> = vec![point!(x: 1., y: 1.).into()];
        assert_eq!(unary_union(&geoms), Geometry::Point(point!(x: 1., y: 1.)));
    }

    #[test]
    fn overlapping_polygons_dissolve() {
        let a = polygon![(x: 0., y: 0.), (x: 2., y: 0.), (x: 2., y: 2.), (x: 0., y: 2.)];
        let b = polygon![(x: 1., y: 0.), (x: 3., y: 0.), (x: 3., y: 2.), (x: 1., y: 2.)];
        let geoms: Vec<Geometry> = vec![a.into(), b.into()];
        let Geometry::Polygon(merged) = unary_union(&geoms) else {
            panic!("expected a polygon");
        };
        approx::assert_relative_eq!(merged.unsigned_area(), 6.0);
    }

    #[test]
    fn points_inside_area_are_absorbed() {
        let a = polygon![(x: 0., y: 0.), (x: 2., y: 0.), (x: 2., y: 2.), (x: 0., y: 2.)];
        let geoms: Vec<Geometry> = vec![a.clone().into(), point!(x: 1., y: 1.).into()];
        assert!(matches!(unary_union(&geoms), Geometry::Polygon(_)));

        let geoms: Vec<Geometry> = vec![a.into(), point!(x: 5., y: 5.).into()];
        assert!(matches!(
            unary_union(&geoms),
            Geometry::GeometryCollection(gc) if gc.len() == 2
        ));
    }

    #[test]
    fn empty_input() {
        let geoms: Vec<Geometry> = vec![];
        assert_eq!(
            unary_union(&geoms),
            Geometry::GeometryCollection(GeometryCollection::new_from(vec![]))
        );
    }

    #[test]
    fn array_skips_nulls() {
        let arr = GeometryArray::new(vec![None, Some(point!(x: 3., y: 4.).into())]);
        assert_eq!(arr.unary_union(), Geometry::Point(point!(x: 3., y: 4.)));
    }
}
