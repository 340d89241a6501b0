//! Hierarchical numeric container used to store performance databases.
//!
//! The container is a tree of named groups whose leaves are numeric datasets,
//! addressed by `/`-separated paths such as `coaxial/H2O/output/Tout/U`.
//! It is persisted as JSON: a leaf is a number, a numeric vector, or an
//! object `{ "shape": [...], "data": [...] }` holding a row-major array.
//! Non-finite values are written as `null` and read back as NaN.

use crate::error::{DatabaseError, DatabaseResult};
use nalgebra::{DMatrix, DVector};
use ndarray::{ArrayD, IxDyn};
use serde_json::{Map, Value};
use std::path::Path;

/// A numeric dataset: a row-major array with an explicit shape.
///
/// Scalars have an empty shape and a single element. The element count
/// always equals the product of the shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl Dataset {
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> DatabaseResult<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(DatabaseError::Shape {
                what: format!("dataset of shape {shape:?}"),
                expected: vec![expected],
                found: vec![data.len()],
            });
        }
        Ok(Self { shape, data })
    }

    pub fn scalar(value: f64) -> Self {
        Self {
            shape: Vec::new(),
            data: vec![value],
        }
    }

    pub fn vector(data: Vec<f64>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn from_matrix(m: &DMatrix<f64>) -> Self {
        let data = m.transpose().as_slice().to_vec();
        Self {
            shape: vec![m.nrows(), m.ncols()],
            data,
        }
    }

    pub fn from_array(a: &ArrayD<f64>) -> Self {
        Self {
            shape: a.shape().to_vec(),
            data: a.iter().copied().collect(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Interpret as a scalar (shape `[]` or `[1]`).
    pub fn as_scalar(&self, path: &str) -> DatabaseResult<f64> {
        match (self.shape.as_slice(), self.data.as_slice()) {
            ([], [v]) | ([1], [v]) => Ok(*v),
            _ => Err(DatabaseError::load(path, "expected a scalar")),
        }
    }

    /// Interpret as a 1-D vector.
    pub fn into_vector(self, path: &str) -> DatabaseResult<Vec<f64>> {
        if self.shape.len() != 1 {
            return Err(DatabaseError::load(path, "expected a 1-D vector"));
        }
        Ok(self.data)
    }

    /// Interpret as a 1-D nalgebra vector.
    pub fn into_dvector(self, path: &str) -> DatabaseResult<DVector<f64>> {
        Ok(DVector::from_vec(self.into_vector(path)?))
    }

    /// Interpret as a 2-D matrix (row-major storage).
    pub fn into_matrix(self, path: &str) -> DatabaseResult<DMatrix<f64>> {
        match self.shape.as_slice() {
            [rows, cols] if rows * cols == self.data.len() => {
                Ok(DMatrix::from_row_slice(*rows, *cols, &self.data))
            }
            [rows, cols] => Err(DatabaseError::Shape {
                what: path.to_string(),
                expected: vec![rows * cols],
                found: vec![self.data.len()],
            }),
            _ => Err(DatabaseError::load(path, "expected a 2-D matrix")),
        }
    }

    /// Interpret as an N-D array.
    pub fn into_array(self, path: &str) -> DatabaseResult<ArrayD<f64>> {
        ArrayD::from_shape_vec(IxDyn(&self.shape), self.data)
            .map_err(|e| DatabaseError::load(path, format!("bad array layout: {e}")))
    }
}

/// Read access to a hierarchical dataset store.
pub trait ContainerSource {
    /// Fetch the dataset at `path`.
    ///
    /// Returns `DatabaseError::DataLoad` if the path does not exist or does
    /// not hold a numeric dataset.
    fn dataset(&self, path: &str) -> DatabaseResult<Dataset>;
}

/// JSON-backed hierarchical container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    root: Map<String, Value>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a container from a JSON file.
    pub fn open(path: &Path) -> DatabaseResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DatabaseError::load(path.display().to_string(), format!("cannot read file: {e}"))
        })?;
        Self::from_json_str(&content)
            .map_err(|e| DatabaseError::load(path.display().to_string(), e.to_string()))
    }

    pub fn from_json_str(content: &str) -> DatabaseResult<Self> {
        match serde_json::from_str(content)? {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(DatabaseError::load("/", "container root must be an object")),
        }
    }

    pub fn to_json_string(&self) -> DatabaseResult<String> {
        Ok(serde_json::to_string(&self.root)?)
    }

    /// Write the container to a JSON file.
    pub fn save(&self, path: &Path) -> DatabaseResult<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Insert `dataset` at `path`, creating intermediate groups.
    pub fn insert(&mut self, path: &str, dataset: Dataset) -> DatabaseResult<()> {
        let segments = split_path(path);
        let Some((leaf, groups)) = segments.split_last() else {
            return Err(DatabaseError::load(path, "empty path"));
        };

        let mut node = &mut self.root;
        for group in groups {
            let entry = node
                .entry(group.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match entry {
                Value::Object(map) if !is_leaf(map) => map,
                _ => return Err(DatabaseError::load(path, format!("'{group}' is not a group"))),
            };
        }
        node.insert(leaf.to_string(), encode(&dataset));
        Ok(())
    }

    /// True if `path` names an existing group or dataset.
    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = split_path(path).into_iter();
        let mut value = self.root.get(segments.next()?)?;
        for segment in segments {
            value = value.as_object()?.get(segment)?;
        }
        Some(value)
    }
}

impl ContainerSource for Container {
    fn dataset(&self, path: &str) -> DatabaseResult<Dataset> {
        let value = self
            .lookup(path)
            .ok_or_else(|| DatabaseError::load(path, "missing field"))?;
        decode(path, value)
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn is_leaf(map: &Map<String, Value>) -> bool {
    map.contains_key("shape") && map.contains_key("data")
}

fn encode_number(v: f64) -> Value {
    serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number)
}

fn encode(dataset: &Dataset) -> Value {
    match dataset.shape.len() {
        0 => dataset.data.first().map_or(Value::Null, |&v| encode_number(v)),
        1 => Value::Array(dataset.data.iter().map(|&v| encode_number(v)).collect()),
        _ => {
            let mut map = Map::new();
            map.insert(
                "shape".to_string(),
                Value::Array(dataset.shape.iter().map(|&n| Value::from(n)).collect()),
            );
            map.insert(
                "data".to_string(),
                Value::Array(dataset.data.iter().map(|&v| encode_number(v)).collect()),
            );
            Value::Object(map)
        }
    }
}

fn decode_number(path: &str, value: &Value) -> DatabaseResult<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| DatabaseError::load(path, "number not representable as f64")),
        Value::Null => Ok(f64::NAN),
        _ => Err(DatabaseError::load(path, "expected a number")),
    }
}

fn decode_numbers(path: &str, values: &[Value]) -> DatabaseResult<Vec<f64>> {
    values.iter().map(|v| decode_number(path, v)).collect()
}

fn decode(path: &str, value: &Value) -> DatabaseResult<Dataset> {
    match value {
        Value::Number(_) | Value::Null => Ok(Dataset::scalar(decode_number(path, value)?)),
        Value::Array(items) => Ok(Dataset::vector(decode_numbers(path, items)?)),
        Value::Object(map) if is_leaf(map) => {
            let shape = map["shape"]
                .as_array()
                .ok_or_else(|| DatabaseError::load(path, "shape must be an array"))?
                .iter()
                .map(|n| {
                    n.as_u64()
                        .map(|n| n as usize)
                        .ok_or_else(|| DatabaseError::load(path, "shape entries must be integers"))
                })
                .collect::<DatabaseResult<Vec<usize>>>()?;
            let data = map["data"]
                .as_array()
                .ok_or_else(|| DatabaseError::load(path, "data must be an array"))?;
            let data = decode_numbers(path, data)?;
            Dataset::new(shape, data).map_err(|e| match e {
                DatabaseError::Shape {
                    expected, found, ..
                } => DatabaseError::Shape {
                    what: path.to_string(),
                    expected,
                    found,
                },
                other => other,
            })
        }
        Value::Object(_) => Err(DatabaseError::load(path, "path names a group, not a dataset")),
        _ => Err(DatabaseError::load(path, "unsupported dataset encoding")),
    }
}
