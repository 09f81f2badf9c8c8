//! JSON storage for a single controller.
//!
//! The file holds one object with exactly the four parameter arrays:
//!
//! ```json
//! {
//!   "w1": [[0.0, 0.0, 0.0], ...],
//!   "b1": [0.0, 0.0, 0.0, 0.0, 0.0],
//!   "w2": [[0.0, 0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0, 0.0]],
//!   "b2": [0.0, 0.0]
//! }
//! ```
//!
//! Values are written with the shortest representation that parses back to the same `f32`,
//! so a save/load cycle is bit-exact. Non-finite values cannot be represented in JSON and
//! are rejected on save.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use crate::Controller;

/// Error returned when a controller file cannot be read or written.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PersistenceError {
    #[display("failed to access controller file {}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    #[display("malformed controller file {}", path.display())]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("controller contains a non-finite parameter and cannot be saved")]
    NonFinite,
}

impl Controller {
    /// Writes this controller to `path`, replacing any existing file.
    pub fn save<P>(&self, path: P) -> Result<(), PersistenceError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if !self.parameters().all(f32::is_finite) {
            return Err(PersistenceError::NonFinite);
        }
        let io_error = |source| PersistenceError::Io {
            path: path.to_owned(),
            source,
        };

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| {
            PersistenceError::Format {
                path: path.to_owned(),
                source,
            }
        })?;
        writeln!(writer).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
        Ok(())
    }

    /// Reads a controller previously written by [`Controller::save`].
    pub fn load<P>(path: P) -> Result<Self, PersistenceError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PersistenceError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| PersistenceError::Format {
            path: path.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("flapnet-controller-{}-{name}.json", process::id()))
    }

    fn assert_bit_identical(a: &Controller, b: &Controller) {
        let a: Vec<u32> = a.parameters().map(f32::to_bits).collect();
        let b: Vec<u32> = b.parameters().map(f32::to_bits).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_roundtrip_zeroed() {
        let path = temp_path("zeroed");
        let controller = Controller::zeroed();
        controller.save(&path).unwrap();
        let loaded = Controller::load(&path).unwrap();
        assert_bit_identical(&controller, &loaded);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_roundtrip_is_bit_exact() {
        let path = temp_path("random");
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut controller = Controller::zeroed();
        for _ in 0..20 {
            controller = controller.tweak(0.37, &mut rng);
        }
        controller.b2 = [-0.0, f32::MIN_POSITIVE];
        controller.b1[0] = -123_456.75;
        controller.w1[0][0] = 1.0e-30;

        controller.save(&path).unwrap();
        let loaded = Controller::load(&path).unwrap();
        assert_bit_identical(&controller, &loaded);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_has_exactly_four_keys() {
        let path = temp_path("keys");
        Controller::zeroed().save(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap())
            .unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["b1", "b2", "w1", "w2"]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_overwrites() {
        let path = temp_path("overwrite");
        let mut rng = Pcg32::seed_from_u64(3);
        let first = Controller::zeroed().tweak(1.0, &mut rng);
        let second = first.tweak(1.0, &mut rng);
        first.save(&path).unwrap();
        second.save(&path).unwrap();
        assert_eq!(Controller::load(&path).unwrap(), second);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let err = Controller::load(temp_path("does-not-exist")).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let path = temp_path("malformed");
        fs::write(&path, r#"{"w1": [[0.0]], "b1": []}"#).unwrap();
        let err = Controller::load(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::Format { .. }));
        assert!(err.to_string().contains("malformed controller file"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let path = temp_path("extra-key");
        let mut value = serde_json::to_value(Controller::zeroed()).unwrap();
        value["w3"] = serde_json::json!([0.0]);
        fs::write(&path, value.to_string()).unwrap();
        assert!(Controller::load(&path).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_non_finite_is_not_saved() {
        let path = temp_path("nan");
        let mut controller = Controller::zeroed();
        controller.b1[2] = f32::NAN;
        assert!(matches!(
            controller.save(&path),
            Err(PersistenceError::NonFinite)
        ));
        assert!(!path.exists());
    }
}
