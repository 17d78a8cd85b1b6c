use std::env;

/// Runtime configuration of the worker pool, read once at startup.
pub struct Configuration {
    max_cores: usize,
    thread_mapping: Vec<usize>,
    pinning: bool,
}

/// Parse the core mapping from the environment variable GRAINBENCH_THREAD_MAPPING.
fn parse_core_mapping() -> Vec<usize> {
    let mut thread_mapping = Vec::new();
    match env::var("GRAINBENCH_THREAD_MAPPING") {
        Ok(val) => {
            for entry in val.split(',') {
                thread_mapping.push(entry.parse::<usize>().unwrap());
            }
        }
        Err(_) => {
            for i in 0..num_cpus::get() {
                thread_mapping.push(i);
            }
        }
    }
    thread_mapping
}

impl Configuration {
    pub fn new(max_cores: usize, pinning: bool) -> Configuration {
        let thread_mapping = parse_core_mapping();

        Configuration {
            max_cores,
            thread_mapping,
            pinning,
        }
    }

    /// Build a configuration from the environment.
    ///
    /// `GRAINBENCH_MAX_CORES` sets the pool size (default: all available
    /// cores). `GRAINBENCH_PINNING` enables worker pinning (default:
    /// false). `GRAINBENCH_THREAD_MAPPING` is a comma-separated list of
    /// core ids used as pinning positions (default: identity mapping).
    pub fn new_default() -> Configuration {
        let max_cores = match env::var("GRAINBENCH_MAX_CORES") {
            Ok(val) => val.parse::<usize>().unwrap(),
            Err(_) => num_cpus::get(),
        };
        let pinning = match env::var("GRAINBENCH_PINNING") {
            Ok(val) => val.parse::<bool>().unwrap(),
            Err(_) => false,
        };
        Configuration::new(max_cores, pinning)
    }

    /// Get the maximum number of cores allowed.
    pub(crate) fn get_max_cores(&self) -> usize {
        self.max_cores
    }

    /// Get the thread mapping.
    pub(crate) fn get_thread_mapping(&self) -> &Vec<usize> {
        &self.thread_mapping
    }

    /// Get the pinning flag.
    pub(crate) fn get_pinning(&self) -> bool {
        self.pinning
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new_default()
    }
}
