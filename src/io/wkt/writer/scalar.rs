use std::fmt::{Error, Write};

use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};

/// Render a geometry as well-known text, e.g. `POINT (0 0)`.
pub fn geometry_to_wkt(geometry: &Geometry) -> String {
    let mut out = String::new();
    write_geometry(geometry, &mut out).expect("writing to a String cannot fail");
    out
}

/// Write a geometry as well-known text.
///
/// Coordinates with no fractional part are written without a decimal point (`POINT (1 2)`);
/// all others use the shortest representation that round-trips.
pub fn write_geometry<W: Write>(geometry: &Geometry, writer: &mut W) -> Result<(), Error> {
    match geometry {
        Geometry::Point(point) => point_to_wkt(point, writer),
        Geometry::Line(line) => {
            linestring_to_wkt(&LineString::new(vec![line.start, line.end]), writer)
        }
        Geometry::LineString(linestring) => linestring_to_wkt(linestring, writer),
        Geometry::Polygon(polygon) => polygon_to_wkt(polygon, writer),
        Geometry::MultiPoint(multi_point) => multi_point_to_wkt(multi_point, writer),
        Geometry::MultiLineString(mls) => multi_linestring_to_wkt(mls, writer),
        Geometry::MultiPolygon(multi_polygon) => multi_polygon_to_wkt(multi_polygon, writer),
        Geometry::GeometryCollection(gc) => geometry_collection_to_wkt(gc, writer),
        Geometry::Rect(rect) => polygon_to_wkt(&rect.to_polygon(), writer),
        Geometry::Triangle(triangle) => polygon_to_wkt(&triangle.to_polygon(), writer),
    }
}

fn point_to_wkt<W: Write>(point: &Point, writer: &mut W) -> Result<(), Error> {
    writer.write_str("POINT")?;

    // geo has no empty point, but NaN coordinates are how one usually arrives
    if point.x().is_nan() && point.y().is_nan() {
        writer.write_str(" EMPTY")?;
        return Ok(());
    }

    writer.write_str(" (")?;
    add_coord(writer, point.0)?;
    writer.write_str(")")?;

    Ok(())
}

fn linestring_to_wkt<W: Write>(linestring: &LineString, writer: &mut W) -> Result<(), Error> {
    writer.write_str("LINESTRING")?;

    if linestring.0.is_empty() {
        writer.write_str(" EMPTY")?;
    } else {
        writer.write_str(" ")?;
        add_coords(writer, linestring)?;
    }

    Ok(())
}

fn polygon_to_wkt<W: Write>(polygon: &Polygon, writer: &mut W) -> Result<(), Error> {
    writer.write_str("POLYGON")?;

    if polygon.exterior().0.is_empty() {
        writer.write_str(" EMPTY")?;
        return Ok(());
    }

    writer.write_str(" ")?;
    add_rings(writer, polygon)?;

    Ok(())
}

fn multi_point_to_wkt<W: Write>(multi_point: &MultiPoint, writer: &mut W) -> Result<(), Error> {
    writer.write_str("MULTIPOINT")?;

    let mut points = multi_point.iter();

    if let Some(first) = points.next() {
        writer.write_str(" ((")?;
        add_coord(writer, first.0)?;

        for point in points {
            writer.write_str("), (")?;
            add_coord(writer, point.0)?;
        }

        writer.write_str("))")?;
    } else {
        writer.write_str(" EMPTY")?;
    }

    Ok(())
}

fn multi_linestring_to_wkt<W: Write>(
    multi_linestring: &MultiLineString,
    writer: &mut W,
) -> Result<(), Error> {
    writer.write_str("MULTILINESTRING")?;

    let mut lines = multi_linestring.iter();

    if let Some(linestring) = lines.next() {
        writer.write_str(" (")?;
        add_coords(writer, linestring)?;

        for linestring in lines {
            writer.write_str(", ")?;
            add_coords(writer, linestring)?;
        }

        writer.write_str(")")?;
    } else {
        writer.write_str(" EMPTY")?;
    }

    Ok(())
}

fn multi_polygon_to_wkt<W: Write>(
    multi_polygon: &MultiPolygon,
    writer: &mut W,
) -> Result<(), Error> {
    writer.write_str("MULTIPOLYGON")?;

    let mut polygons = multi_polygon.iter();

    if let Some(polygon) = polygons.next() {
        writer.write_str(" (")?;
        add_rings(writer, polygon)?;

        for polygon in polygons {
            writer.write_str(", ")?;
            add_rings(writer, polygon)?;
        }

        writer.write_str(")")?;
    } else {
        writer.write_str(" EMPTY")?;
    };

    Ok(())
}

fn geometry_collection_to_wkt<W: Write>(
    gc: &GeometryCollection,
    writer: &mut W,
) -> Result<(), Error> {
    writer.write_str("GEOMETRYCOLLECTION")?;

    let mut geometries = gc.iter();

    if let Some(first) = geometries.next() {
        writer.write_str(" (")?;

        write_geometry(first, writer)?;

        for geom in geometries {
            writer.write_str(", ")?;
            write_geometry(geom, writer)?;
        }

        writer.write_str(")")?;
    } else {
        writer.write_str(" EMPTY")?;
    }

    Ok(())
}

fn add_number<W: Write>(writer: &mut W, value: f64) -> Result<(), Error> {
    if value == 0.0 && value.is_sign_negative() {
        writer.write_str("-0")
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        write!(writer, "{}", value as i64)
    } else {
        let mut buffer = ryu::Buffer::new();
        writer.write_str(buffer.format(value))
    }
}

fn add_coord<W: Write>(writer: &mut W, coord: Coord) -> Result<(), Error> {
    add_number(writer, coord.x)?;
    writer.write_str(" ")?;
    add_number(writer, coord.y)
}

fn add_coords<W: Write>(writer: &mut W, linestring: &LineString) -> Result<(), Error> {
    writer.write_str("(")?;

    let mut coords = linestring.0.iter();
    if let Some(first) = coords.next() {
        add_coord(writer, *first)?;
    }
    for coord in coords {
        writer.write_str(", ")?;
        add_coord(writer, *coord)?;
    }

    writer.write_str(")")?;

    Ok(())
}

fn add_rings<W: Write>(writer: &mut W, polygon: &Polygon) -> Result<(), Error> {
    writer.write_str("(")?;

    add_coords(writer, polygon.exterior())?;
    for interior in polygon.interiors() {
        writer.write_str(", ")?;
        add_coords(writer, interior)?;
    }

    writer.write_str(")")?;

    Ok(())
}
