//! Python bindings for the read-only dataset surface

use crate::dataset::{DecodeOptions, IntegrationAxis, Intensity, Region};
use crate::error::Error;
use crate::processing::range_table;
use crate::Dataset;
use numpy::{PyArray1, ToPyArray};
use pyo3::exceptions::{PyFileNotFoundError, PyValueError};
use pyo3::prelude::*;
use pyo3_polars::PyDataFrame;
use std::path::PathBuf;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        match err {
            Error::Io(_) => PyFileNotFoundError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

#[pyclass(name = "Dataset", module = "rawxrd", frozen)]
pub struct PyDataset {
    inner: Dataset,
}

#[pymethods]
impl PyDataset {
    /// Opens and decodes a RAW1.01 file.
    ///
    /// Raises:
    ///     FileNotFoundError: If the file cannot be read.
    ///     ValueError: If the file is not a valid RAW1.01 file.
    #[staticmethod]
    #[pyo3(signature = (path, parallel = false))]
    fn open(path: PathBuf, parallel: bool) -> PyResult<Self> {
        let options = DecodeOptions::builder().parallel(parallel).build();
        Ok(Self {
            inner: Dataset::open_with(&path, &options)?,
        })
    }

    #[getter]
    fn source(&self) -> String {
        self.inner.source().to_string()
    }

    #[getter]
    fn angular<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.angular_axis().to_pyarray(py)
    }

    /// `None` for a single scan.
    #[getter]
    fn tilt<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray1<f64>>> {
        self.inner.tilt_axis().map(|axis| axis.to_pyarray(py))
    }

    /// 1D array for a scan, 2D array (tilt x angular) for an area map.
    #[getter]
    fn intensity<'py>(&self, py: Python<'py>) -> Bound<'py, PyAny> {
        match self.inner.intensity() {
            Intensity::Scan(scan) => scan.to_pyarray(py).into_any(),
            Intensity::Map(map) => map.to_pyarray(py).into_any(),
        }
    }

    #[pyo3(signature = (angular = None, tilt = None))]
    fn index_of(&self, angular: Option<f64>, tilt: Option<f64>) -> PyResult<(Option<usize>, Option<usize>)> {
        Ok(self.inner.index_of(angular, tilt)?)
    }

    /// Sums the intensity over a region.
    ///
    /// Args:
    ///     area: "all" or an (x1, y1, x2, y2) index box.
    ///     axis: axis to preserve, "angular" or "tilt".
    #[pyo3(signature = (area = None, axis = "angular"))]
    fn integrate<'py>(
        &self,
        py: Python<'py>,
        area: Option<&Bound<'py, PyAny>>,
        axis: &str,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let region = match area {
            None => Region::All,
            Some(area) => match area.extract::<String>() {
                Ok(token) => token.parse::<Region>()?,
                Err(_) => Region::from_bounds(&area.extract::<Vec<usize>>()?)?,
            },
        };
        let axis = axis.parse::<IntegrationAxis>()?;
        Ok(self.inner.integrate(&region, axis)?.to_pyarray(py))
    }

    /// Per-range metadata as a polars DataFrame.
    fn ranges(&self) -> PyResult<PyDataFrame> {
        let df = range_table(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyDataFrame(df))
    }

    fn metadata_json(&self) -> PyResult<String> {
        Ok(self.inner.metadata_json()?)
    }

    fn summary(&self) -> String {
        self.inner.summary()
    }

    fn __add__(&self, other: PyRef<'_, PyDataset>) -> PyResult<PyDataset> {
        Ok(PyDataset {
            inner: self.inner.combine(&other.inner)?,
        })
    }

    fn __repr__(&self) -> String {
        let (rows, columns) = self.inner.intensity().shape();
        format!("Dataset(source={:?}, shape=({rows}, {columns}))", self.inner.source())
    }
}

/// `import rawxrd` entry point.
#[pymodule]
fn rawxrd(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDataset>()?;
    Ok(())
}
