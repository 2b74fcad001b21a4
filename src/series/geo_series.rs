use std::ops::Range;
use std::sync::Arc;

use arrow_array::{ArrayRef, BooleanArray};
use arrow_schema::DataType;
use geo::Geometry;
use tracing::{debug, trace};

use crate::algorithm::geo::{IsEmpty, UnaryUnion};
use crate::algorithm::native::{
    eq_value, optional_positions_to_indices, positions_to_indices, Filter, Take, ToWKT, Unique,
};
use crate::array::GeometryArray;
use crate::error::{GeoFrameError, Result};
use crate::index::Index;
use crate::ops::ArithmeticOp;
use crate::scalar::{Label, Value};
use crate::series::Series;

/// A labeled sequence of nullable geometries.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoSeries {
    pub(crate) name: Option<String>,
    pub(crate) index: Index,
    pub(crate) values: GeometryArray,
}

fn unsupported(operation: &str) -> GeoFrameError {
    GeoFrameError::IncorrectType(
        format!("geometry series does not support {}", operation).into(),
    )
}

impl GeoSeries {
    /// Wrap `values` with a default `0..len` index.
    pub fn new(values: GeometryArray) -> Self {
        Self {
            name: None,
            index: Index::range(values.len()),
            values,
        }
    }

    pub fn try_new(index: Index, values: GeometryArray, name: Option<String>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(GeoFrameError::LengthMismatch {
                expected: values.len(),
                actual: index.len(),
            });
        }
        Ok(Self {
            name,
            index,
            values,
        })
    }

    /// Build from nullable geometries with a default index.
    pub fn from_geometries(geoms: impl IntoIterator<Item = Option<Geometry>>) -> Self {
        Self::new(geoms.into_iter().collect())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_index(self, index: Index) -> Result<Self> {
        Self::try_new(index, self.values, self.name)
    }

    /// Replace the labels in place, keeping the values.
    pub fn set_index(&mut self, index: Index) -> Result<()> {
        if index.len() != self.len() {
            return Err(GeoFrameError::LengthMismatch {
                expected: self.len(),
                actual: index.len(),
            });
        }
        self.index = index;
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn values(&self) -> &GeometryArray {
        &self.values
    }

    pub fn into_values(self) -> GeometryArray {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn derive(&self, index: Index, values: GeometryArray) -> Self {
        Self {
            name: self.name.clone(),
            index,
            values,
        }
    }

    fn derive_series(&self, values: ArrayRef) -> Series {
        Series {
            name: self.name.clone(),
            index: self.index.clone(),
            values,
        }
    }

    /// Geometry at the first occurrence of `label`.
    pub fn get(&self, label: impl Into<Label>) -> Result<Option<&Geometry>> {
        let pos = self.index.try_get_loc(&label.into())?;
        self.values.try_get(pos)
    }

    /// Geometry at position `pos`.
    pub fn iget(&self, pos: usize) -> Result<Option<&Geometry>> {
        self.values.try_get(pos)
    }

    /// Select by labels. Every label must be present.
    pub fn loc(&self, labels: &[Label]) -> Result<Self> {
        let positions = self.index.get_locs(labels)?;
        self.iloc(&positions)
    }

    /// Select by positions.
    pub fn iloc(&self, positions: &[usize]) -> Result<Self> {
        let values = self.values.take(&positions_to_indices(positions))?;
        Ok(self.derive(self.index.take(positions), values))
    }

    /// Conform to new labels. Labels absent from the current index get a null geometry.
    pub fn reindex(&self, labels: &[Label]) -> Result<Self> {
        let indexer = self.index.get_indexer(labels);
        let missing = indexer.iter().filter(|p| p.is_none()).count();
        debug!(len = labels.len(), missing, "reindex geometry series");

        let values = self
            .values
            .take(&optional_positions_to_indices(&indexer))?;
        let mut index = Index::new(labels.to_vec());
        index.set_name(self.index.name().map(String::from));
        Ok(self.derive(index, values))
    }

    /// Keep rows where `mask` is true.
    pub fn filter(&self, mask: &[bool]) -> Result<Self> {
        self.filter_array(&BooleanArray::from(mask.to_vec()))
    }

    /// Keep rows where `mask` is true. Null mask slots drop the row.
    pub fn filter_array(&self, mask: &BooleanArray) -> Result<Self> {
        let values = self.values.filter(mask)?;
        let keep: Vec<bool> = mask.iter().map(|v| v == Some(true)).collect();
        Ok(self.derive(self.index.filter(&keep), values))
    }

    /// Positional slice.
    pub fn islice(&self, range: Range<usize>) -> Result<Self> {
        let values = self.values.take_range(&range)?;
        let index = self.index.slice(range)?;
        Ok(self.derive(index, values))
    }

    /// Label slice with inclusive bounds. A `None` bound is open.
    pub fn loc_slice(&self, start: Option<&Label>, end: Option<&Label>) -> Result<Self> {
        let range = self.index.slice_locs(start, end)?;
        self.islice(range)
    }

    /// Write the geometry at the first occurrence of `label`.
    pub fn set(&mut self, label: impl Into<Label>, value: Option<Geometry>) -> Result<()> {
        let label = label.into();
        let pos = self.index.try_get_loc(&label)?;
        trace!(%label, pos, "set geometry");
        self.values.set(pos, value)
    }

    /// Write the geometry at position `pos`.
    pub fn iset(&mut self, pos: usize, value: Option<Geometry>) -> Result<()> {
        trace!(pos, "set geometry");
        self.values.set(pos, value)
    }

    /// Cast to another type. Only text targets are supported; they yield WKT.
    pub fn astype(&self, data_type: &DataType) -> Result<Series> {
        match data_type {
            DataType::Utf8 => Ok(self.derive_series(Arc::new(self.values.to_wkt()))),
            DataType::LargeUtf8 | DataType::Utf8View => {
                let wkt: ArrayRef = Arc::new(self.values.to_wkt());
                Ok(self.derive_series(arrow_cast::cast(wkt.as_ref(), data_type)?))
            }
            other => Err(GeoFrameError::IncorrectType(
                format!("cannot cast geometry to {}", other).into(),
            )),
        }
    }

    pub fn sum(&self) -> Result<Value> {
        Err(unsupported("sum"))
    }

    pub fn max(&self) -> Result<Value> {
        Err(unsupported("max"))
    }

    pub fn min(&self) -> Result<Value> {
        Err(unsupported("min"))
    }

    pub fn idxmax(&self) -> Result<Label> {
        Err(unsupported("idxmax"))
    }

    pub fn idxmin(&self) -> Result<Label> {
        Err(unsupported("idxmin"))
    }

    /// Arithmetic is undefined on geometries and always fails.
    pub fn binary_op(&self, op: ArithmeticOp, rhs: &Value) -> Result<Self> {
        Err(GeoFrameError::IncorrectType(
            format!(
                "unsupported operand types for {}: geometry and {}",
                op.symbol(),
                rhs.type_name()
            )
            .into(),
        ))
    }

    /// Unary plus is undefined on geometries and always fails.
    pub fn pos(&self) -> Result<Self> {
        Err(unsupported("unary +"))
    }

    /// Unary minus is undefined on geometries and always fails.
    pub fn neg(&self) -> Result<Self> {
        Err(unsupported("unary -"))
    }

    /// Element-wise equality. Comparing against a non-geometry is false everywhere.
    pub fn eq_value(&self, rhs: &Value) -> Series {
        self.derive_series(Arc::new(eq_value(&self.values, rhs)))
    }

    /// Complement of [`GeoSeries::eq_value`]; null slots are unequal to everything.
    pub fn ne_value(&self, rhs: &Value) -> Series {
        let eq = eq_value(&self.values, rhs);
        let ne: BooleanArray = eq.iter().map(|v| v.map(|v| !v)).collect();
        self.derive_series(Arc::new(ne))
    }

    pub fn isna(&self) -> Series {
        self.derive_series(Arc::new(self.values.is_na()))
    }

    /// Alias of [`GeoSeries::isna`].
    pub fn isnull(&self) -> Series {
        self.isna()
    }

    pub fn notna(&self) -> Series {
        let valid: BooleanArray = self.values.iter().map(|g| Some(g.is_some())).collect();
        self.derive_series(Arc::new(valid))
    }

    /// Alias of [`GeoSeries::notna`].
    pub fn notnull(&self) -> Series {
        self.notna()
    }

    /// Replace nulls with `value`.
    pub fn fillna(&self, value: &Geometry) -> Self {
        self.derive(self.index.clone(), self.values.fill_null(value))
    }

    /// Drop null rows.
    pub fn dropna(&self) -> Self {
        let keep: Vec<bool> = self.values.iter().map(|g| g.is_some()).collect();
        let values = self.values.iter_valid().cloned().map(Some).collect();
        self.derive(self.index.filter(&keep), values)
    }

    /// Keep values where `mask` is true and null out the rest.
    pub fn where_mask(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.len() {
            return Err(GeoFrameError::LengthMismatch {
                expected: self.len(),
                actual: mask.len(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(mask)
            .map(|(g, &keep)| if keep { g.cloned() } else { None })
            .collect();
        Ok(self.derive(self.index.clone(), values))
    }

    /// Distinct values in order of first appearance.
    pub fn unique(&self) -> GeometryArray {
        self.values.unique()
    }

    /// Distinct non-null geometries with their counts, most frequent first.
    pub fn value_counts(&self) -> Vec<(Geometry, usize)> {
        self.values.value_counts()
    }

    /// Drop rows whose geometry equals an earlier row's, keeping labels of the first occurrence.
    pub fn drop_duplicates(&self) -> Self {
        let keep: Vec<bool> = self.values.duplicated().into_iter().map(|d| !d).collect();
        let values = self
            .values
            .iter()
            .zip(&keep)
            .filter_map(|(g, &k)| k.then(|| g.cloned()))
            .collect();
        self.derive(self.index.filter(&keep), values)
    }

    /// Whether each geometry is empty; null rows are not empty.
    pub fn is_empty_geometry(&self) -> Series {
        self.derive_series(Arc::new(self.values.is_empty_geometry()))
    }

    /// Apply a predicate to every non-null geometry. Null rows produce null.
    pub fn map_bool<F: Fn(&Geometry) -> bool>(&self, f: F) -> Series {
        let values: BooleanArray = self.values.iter().map(|g| g.map(&f)).collect();
        self.derive_series(Arc::new(values))
    }

    /// Transform every non-null geometry. Null rows stay null.
    pub fn map_geometry<F: Fn(&Geometry) -> Geometry>(&self, f: F) -> Self {
        let values = self.values.iter().map(|g| g.map(&f)).collect();
        self.derive(self.index.clone(), values)
    }

    /// Merge all non-null geometries into one.
    pub fn unary_union(&self) -> Geometry {
        self.values.unary_union()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::point::{self, p};
    use arrow_array::cast::AsArray;
    use arrow_array::StringArray;

    fn labels(v: &[i64]) -> Vec<Label> {
        v.iter().map(|&i| Label::from(i)).collect()
    }

    #[test]
    fn scalar_access_agrees() {
        let s = point::s();
        let exp: Geometry = p(1.).into();
        assert_eq!(s.get(1).unwrap(), Some(&exp));
        assert_eq!(s.iget(1).unwrap(), Some(&exp));
        let masked = s.filter(&[false, true, false]).unwrap();
        assert_eq!(masked.iget(0).unwrap(), Some(&exp));

        assert!(matches!(s.get(7), Err(GeoFrameError::KeyError(_))));
        assert!(matches!(
            s.iget(7),
            Err(GeoFrameError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn multiple_values() {
        let s = point::s();
        let exp = GeoSeries::try_new(
            labels(&[2, 0]).into(),
            vec![p(2.), p(0.)].into(),
            None,
        )
        .unwrap();
        assert_eq!(s.loc(&labels(&[2, 0])).unwrap(), exp);
        assert_eq!(s.iloc(&[2, 0]).unwrap(), exp);
        assert_eq!(s.reindex(&labels(&[2, 0])).unwrap(), exp);
        assert!(s.loc(&labels(&[9])).is_err());
    }

    #[test]
    fn boolean_indexing() {
        let s = point::s();
        let exp = GeoSeries::try_new(
            labels(&[0, 2]).into(),
            vec![p(0.), p(2.)].into(),
            None,
        )
        .unwrap();
        assert_eq!(s.filter(&[true, false, true]).unwrap(), exp);
        assert!(s.filter(&[true]).is_err());
    }

    #[test]
    fn slices() {
        let mut s = point::s();
        s.set_index(labels(&[1, 2, 3]).into()).unwrap();
        let exp = GeoSeries::try_new(
            labels(&[2, 3]).into(),
            vec![p(1.), p(2.)].into(),
            None,
        )
        .unwrap();
        assert_eq!(s.islice(1..3).unwrap(), exp);
        assert_eq!(s.loc_slice(Some(&Label::from(2)), None).unwrap(), exp);
    }

    #[test]
    fn out_of_bounds_slices_fail() {
        let s = point::s();
        let (start, end) = (2, 1);
        assert!(matches!(
            s.islice(start..end),
            Err(GeoFrameError::IndexOutOfBounds { index: 1, len: 3 })
        ));
        assert!(matches!(
            s.islice(1..4),
            Err(GeoFrameError::IndexOutOfBounds { index: 4, len: 3 })
        ));
        assert!(s.islice(3..3).unwrap().is_empty());
    }

    #[test]
    fn reindex_inserts_null() {
        let s = point::s();
        let res = s.reindex(&labels(&[1, 2, 3])).unwrap();
        let exp = GeoSeries::try_new(
            labels(&[1, 2, 3]).into(),
            vec![Some(p(1.)), Some(p(2.)), None].into(),
            None,
        )
        .unwrap();
        assert_eq!(res, exp);
    }

    #[test]
    fn assignment() {
        let exp = GeoSeries::new(vec![p(10.), p(1.), p(2.)].into());

        let mut s2 = point::s();
        s2.set(0, Some(p(10.).into())).unwrap();
        assert_eq!(s2, exp);

        let mut s2 = point::s();
        s2.iset(0, Some(p(10.).into())).unwrap();
        assert_eq!(s2, exp);
        assert_eq!(s2.get(0).unwrap(), s2.filter(&[true, false, false]).unwrap().iget(0).unwrap());

        // the original is untouched
        assert_eq!(point::s().iget(0).unwrap(), Some(&p(0.).into()));
    }

    #[test]
    fn astype() {
        let s = point::s();
        assert!(matches!(
            s.astype(&DataType::Int64),
            Err(GeoFrameError::IncorrectType(_))
        ));
        let text = s.astype(&DataType::Utf8).unwrap();
        assert_eq!(text.value(0).unwrap(), Value::from("POINT (0 0)"));
        assert_eq!(
            text.values().as_string::<i32>(),
            &StringArray::from(vec!["POINT (0 0)", "POINT (1 1)", "POINT (2 2)"])
        );
    }

    #[test]
    fn numerical_operations_fail() {
        let s = point::s();
        assert!(matches!(s.sum(), Err(GeoFrameError::IncorrectType(_))));
        assert!(matches!(s.max(), Err(GeoFrameError::IncorrectType(_))));
        assert!(matches!(s.min(), Err(GeoFrameError::IncorrectType(_))));
        assert!(matches!(s.idxmax(), Err(GeoFrameError::IncorrectType(_))));
        assert!(matches!(s.idxmin(), Err(GeoFrameError::IncorrectType(_))));
        assert!(matches!(
            s.binary_op(ArithmeticOp::Add, &Value::Int64(1)),
            Err(GeoFrameError::IncorrectType(_))
        ));
        assert!(matches!(s.pos(), Err(GeoFrameError::IncorrectType(_))));
        assert!(matches!(s.neg(), Err(GeoFrameError::IncorrectType(_))));
    }

    #[test]
    fn comparisons_do_not_fail() {
        let s = point::s();
        let res = s.eq_value(&Value::Int64(100));
        assert_eq!(
            res.as_boolean().unwrap(),
            &BooleanArray::from(vec![false, false, false])
        );
        let res = s.eq_value(&Value::from(p(1.)));
        assert_eq!(
            res.as_boolean().unwrap(),
            &BooleanArray::from(vec![false, true, false])
        );
        let res = s.ne_value(&Value::from(p(1.)));
        assert_eq!(
            res.as_boolean().unwrap(),
            &BooleanArray::from(vec![true, false, true])
        );
    }

    #[test]
    fn where_mask_length_mismatch() {
        let s = point::s();
        assert!(matches!(
            s.where_mask(&[true, false]),
            Err(GeoFrameError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn where_mask() {
        let s = point::s();
        let res = s.where_mask(&[true, false, true]).unwrap();
        assert_eq!(
            res,
            GeoSeries::new(vec![Some(p(0.)), None, Some(p(2.))].into())
        );
    }

    #[test]
    fn fillna() {
        let s2 = GeoSeries::new(point::nullable_array());
        assert_eq!(s2.fillna(&p(1.).into()), point::s());
    }

    #[test]
    fn dropna() {
        let s2 = GeoSeries::new(point::nullable_array());
        assert_eq!(s2.dropna(), s2.loc(&labels(&[0, 2])).unwrap());
    }

    #[test]
    fn isna() {
        let s2 = GeoSeries::try_new(
            labels(&[2, 4, 5]).into(),
            point::nullable_array(),
            Some("tt".to_string()),
        )
        .unwrap();
        let values: ArrayRef = Arc::new(BooleanArray::from(vec![false, true, false]));
        let exp = Series::try_new(labels(&[2, 4, 5]).into(), values, Some("tt".to_string()))
            .unwrap();

        assert_eq!(s2.isnull(), exp);
        assert_eq!(s2.isna(), exp);
        assert_eq!(s2.notnull(), exp.not().unwrap());
        assert_eq!(s2.notna(), exp.not().unwrap());
    }

    #[test]
    fn unique_and_duplicates() {
        let s = GeoSeries::new(vec![p(0.), p(0.), p(2.)].into());
        assert_eq!(s.unique(), vec![p(0.), p(2.)].into());

        let dropped = s.drop_duplicates();
        assert_eq!(dropped.len(), 2);
        assert_eq!(dropped.index().labels(), &labels(&[0, 2])[..]);

        let s = GeoSeries::new(vec![p(0.), p(1.), p(0.)].into());
        let expected: Vec<(Geometry, usize)> = vec![(p(0.).into(), 2), (p(1.).into(), 1)];
        assert_eq!(s.value_counts(), expected);
    }

    #[test]
    fn apply_on_single_row_subset() {
        let subset = point::s().loc(&labels(&[0])).unwrap();
        let result = subset.map_bool(|g| geo::dimensions::HasDimensions::is_empty(g));
        assert_eq!(result, subset.is_empty_geometry());
    }

    #[test]
    fn union() {
        let s = point::s();
        let merged = s.map_geometry(|g| g.clone()).unary_union();
        assert!(matches!(merged, Geometry::MultiPoint(mp) if mp.0.len() == 3));
    }
}
