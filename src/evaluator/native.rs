use super::{Evaluator, EvaluatorOptions, validate_configuration};
use crate::error::CalcError;
use crate::types::{CalculationResult, Configuration};
use libloading::Library;
use log::{debug, info};
use std::cell::Cell as NotSync;
use std::ffi::{CString, c_char, c_int};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// File name of the serial calculator's C wrapper library.
pub const LIBRARY_FILE_NAME: &str = "libwrapper-C.so";

type SetChimesFn = unsafe extern "C" fn(small: c_int);
type InitChimesFn = unsafe extern "C" fn(param_file: *mut c_char, rank: *mut c_int);
type CalculateChimesFn = unsafe extern "C" fn(
    natom: *mut c_int,
    xc: *mut f64,
    yc: *mut f64,
    zc: *mut f64,
    atom_types: *mut *mut c_char,
    ca: *mut f64,
    cb: *mut f64,
    cc: *mut f64,
    energy: *mut f64,
    fx: *mut f64,
    fy: *mut f64,
    fz: *mut f64,
    stress: *mut f64,
);

/// The ChIMES serial calculator, loaded at runtime from its C wrapper library.
///
/// The library keeps its force field in process-global state, so a handle must be
/// [initialized](NativeLibrary::initialize) with a parameter file before it can evaluate
/// anything. The handle can move to another thread but is not `Sync`, so two threads can
/// never evaluate through it at the same time:
///
/// ```compile_fail
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<chimes_calc::NativeLibrary>();
/// ```
pub struct NativeLibrary {
    path: PathBuf,
    set_chimes: SetChimesFn,
    init_chimes: InitChimesFn,
    calculate_chimes: CalculateChimesFn,
    initialized: bool,
    // must outlive the function pointers above
    _library: Library,
    _not_sync: PhantomData<NotSync<()>>,
}

impl NativeLibrary {
    /// Returns where the wrapper library is expected: inside `dir` when given, otherwise the
    /// bare file name, resolved by the platform loader's search path.
    pub fn locate(dir: Option<&Path>) -> PathBuf {
        match dir {
            Some(dir) => dir.join(LIBRARY_FILE_NAME),
            None => PathBuf::from(LIBRARY_FILE_NAME),
        }
    }

    /// Loads the shared library at `path` and resolves the calculator entry points.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::Library` if the library cannot be loaded or does not export
    /// `set_chimes`, `init_chimes` and `calculate_chimes`.
    pub fn open(path: &Path) -> Result<Self, CalcError> {
        let library_error = |source| CalcError::Library {
            path: path.to_path_buf(),
            source,
        };

        debug!("Loading calculator library from '{}'", path.display());
        // SAFETY: loading runs the library's initializers; the wrapper library has no
        // requirements beyond being a valid shared object.
        let library = unsafe { Library::new(path) }.map_err(library_error)?;

        // SAFETY: the signatures match the declarations of the C wrapper header, and the
        // pointers are stored next to `library`, which keeps them valid.
        let (set_chimes, init_chimes, calculate_chimes) = unsafe {
            let set_chimes = *library
                .get::<SetChimesFn>(b"set_chimes\0")
                .map_err(library_error)?;
            let init_chimes = *library
                .get::<InitChimesFn>(b"init_chimes\0")
                .map_err(library_error)?;
            let calculate_chimes = *library
                .get::<CalculateChimesFn>(b"calculate_chimes\0")
                .map_err(library_error)?;
            (set_chimes, init_chimes, calculate_chimes)
        };

        Ok(Self::from_parts(
            path,
            library,
            set_chimes,
            init_chimes,
            calculate_chimes,
        ))
    }

    fn from_parts(
        path: &Path,
        library: Library,
        set_chimes: SetChimesFn,
        init_chimes: InitChimesFn,
        calculate_chimes: CalculateChimesFn,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            set_chimes,
            init_chimes,
            calculate_chimes,
            initialized: false,
            _library: library,
            _not_sync: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Configures the calculator and reads the force-field parameter file.
    ///
    /// Parameter-file problems are reported by the calculator itself, which usually aborts
    /// the process; they cannot be surfaced as errors here.
    pub fn initialize(
        &mut self,
        param_file: &Path,
        options: &EvaluatorOptions,
    ) -> Result<(), CalcError> {
        let param_file_c = path_to_cstring(param_file)?;
        let mut rank: c_int = options.rank;

        debug!(
            "Initializing calculator: parameters = '{}', small = {}, rank = {}",
            param_file.display(),
            options.small,
            options.rank
        );
        // SAFETY: `set_chimes` takes an int by value. `init_chimes` only reads the
        // NUL-terminated parameter path and the rank, both alive for the whole call.
        unsafe {
            (self.set_chimes)(c_int::from(options.small));
            (self.init_chimes)(param_file_c.as_ptr() as *mut c_char, &mut rank);
        }

        self.initialized = true;
        Ok(())
    }
}

impl Evaluator for NativeLibrary {
    fn evaluate(&self, config: &Configuration) -> Result<CalculationResult, CalcError> {
        if !self.initialized {
            return Err(CalcError::NotInitialized);
        }
        validate_configuration(config)?;

        let mut buffers = CallBuffers::new(config)?;
        let mut label_ptrs: Vec<*mut c_char> = buffers
            .labels
            .iter()
            .map(|label| label.as_ptr() as *mut c_char)
            .collect();

        info!("Evaluating {} atoms", buffers.natom);
        // SAFETY: every per-atom array holds exactly `natom` elements, the cell vectors hold
        // three and the stress tensor nine. The label pointers borrow from `buffers.labels`,
        // which outlives the call. The calculator writes only to energy, forces and stress.
        unsafe {
            (self.calculate_chimes)(
                &mut buffers.natom,
                buffers.x.as_mut_ptr(),
                buffers.y.as_mut_ptr(),
                buffers.z.as_mut_ptr(),
                label_ptrs.as_mut_ptr(),
                buffers.cell_a.as_mut_ptr(),
                buffers.cell_b.as_mut_ptr(),
                buffers.cell_c.as_mut_ptr(),
                &mut buffers.energy,
                buffers.fx.as_mut_ptr(),
                buffers.fy.as_mut_ptr(),
                buffers.fz.as_mut_ptr(),
                buffers.stress.as_mut_ptr(),
            );
        }

        let result = buffers.into_result();
        info!("Evaluation finished, energy = {} kcal/mol", result.energy);
        Ok(result)
    }
}

/// Caller-owned C buffers for one `calculate_chimes` call.
///
/// Positions are split per axis and outputs are zeroed, the layout the calculator expects.
#[derive(Debug)]
pub(crate) struct CallBuffers {
    pub(crate) natom: c_int,
    pub(crate) labels: Vec<CString>,
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
    pub(crate) z: Vec<f64>,
    pub(crate) cell_a: [f64; 3],
    pub(crate) cell_b: [f64; 3],
    pub(crate) cell_c: [f64; 3],
    pub(crate) energy: f64,
    pub(crate) fx: Vec<f64>,
    pub(crate) fy: Vec<f64>,
    pub(crate) fz: Vec<f64>,
    pub(crate) stress: [f64; 9],
}

impl CallBuffers {
    pub(crate) fn new(config: &Configuration) -> Result<Self, CalcError> {
        let n = config.natoms();
        let natom = c_int::try_from(n).map_err(|_| CalcError::TooManyAtoms(n))?;

        let labels = config
            .atoms
            .iter()
            .enumerate()
            .map(|(index, atom)| {
                CString::new(atom.label.as_str()).map_err(|_| CalcError::InvalidLabel {
                    index,
                    label: atom.label.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let positions: Vec<[f64; 3]> = config.atoms.iter().map(|a| a.position).collect();
        let axis = |k: usize| positions.iter().map(|p| p[k]).collect::<Vec<f64>>();

        Ok(Self {
            natom,
            labels,
            x: axis(0),
            y: axis(1),
            z: axis(2),
            cell_a: config.cell.a,
            cell_b: config.cell.b,
            cell_c: config.cell.c,
            energy: 0.0,
            fx: vec![0.0; n],
            fy: vec![0.0; n],
            fz: vec![0.0; n],
            stress: [0.0; 9],
        })
    }

    pub(crate) fn into_result(self) -> CalculationResult {
        let forces = self
            .fx
            .iter()
            .zip(&self.fy)
            .zip(&self.fz)
            .map(|((&fx, &fy), &fz)| [fx, fy, fz])
            .collect();

        CalculationResult {
            energy: self.energy,
            stress: self.stress,
            forces,
        }
    }
}

/// Passes the raw path bytes through unchanged; only interior NUL bytes are rejected.
#[cfg(unix)]
fn path_to_cstring(path: &Path) -> Result<CString, CalcError> {
    use std::os::unix::ffi::OsStrExt;

    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| CalcError::InvalidPath(path.to_path_buf()))
}

/// Outside unix there is no lossless byte view of a path, so non-UTF-8 paths are rejected.
#[cfg(not(unix))]
fn path_to_cstring(path: &Path) -> Result<CString, CalcError> {
    let text = path
        .to_str()
        .ok_or_else(|| CalcError::InvalidPath(path.to_path_buf()))?;
    CString::new(text).map_err(|_| CalcError::InvalidPath(path.to_path_buf()))
}
