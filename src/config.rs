use std::path::{Path, PathBuf};

use clap::Args;

pub const BASE_URL: &str = "https://www.reddit.com/r/goodyearwelt";
pub const RECORDS_FILENAME: &str = "size-records.json";

pub struct ThreadSource {
    pub year: u16,
    pub path: &'static str,
}

pub const THREADS: &[ThreadSource] = &[
    ThreadSource {
        year: 2017,
        path: "comments/5ibtzh/manufacturer_last_sizing_thread",
    },
    ThreadSource {
        year: 2018,
        path: "comments/7t1whc/manufacturer_last_sizing_thread_2018",
    },
];

pub struct PageAttrs {
    pub name: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub const SIZES_PAGE: PageAttrs = PageAttrs {
    name: "sizes",
    title: "Brannock Sizes",
    subtitle: "r/goodyearwelt supplied sizes organized by Brannock size",
};

pub const MODELS_PAGE: PageAttrs = PageAttrs {
    name: "models",
    title: "Models & Lasts",
    subtitle: "r/goodyearwelt supplied sizes organized by Model/Last",
};

/// Where downloaded threads, intermediate records and the site live.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Directory for downloaded threads and extracted records
    #[arg(long, env = "LAST_SIZING_DATA_DIR", default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Directory the static site is written to
    #[arg(long, env = "LAST_SIZING_BUILD_DIR", default_value = "build", global = true)]
    pub build_dir: PathBuf,

    /// Filename prefix shared by downloaded thread files
    #[arg(long, env = "LAST_SIZING_PREFIX", default_value = "last-sizing-thread-", global = true)]
    pub prefix: String,
}

impl Settings {
    pub fn thread_file(&self, thread: &ThreadSource) -> PathBuf {
        self.data_dir.join(format!("{}{}.json", self.prefix, thread.year))
    }

    pub fn records_file(&self) -> PathBuf {
        self.data_dir.join(RECORDS_FILENAME)
    }

    pub fn is_thread_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.contains(&self.prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            data_dir: PathBuf::from("data"),
            build_dir: PathBuf::from("build"),
            prefix: "last-sizing-thread-".into(),
        }
    }

    #[test]
    fn thread_file_names() {
        let s = settings();
        assert_eq!(
            s.thread_file(&THREADS[1]),
            PathBuf::from("data/last-sizing-thread-2018.json")
        );
        assert_eq!(s.records_file(), PathBuf::from("data/size-records.json"));
    }

    #[test]
    fn recognises_thread_files() {
        let s = settings();
        assert!(s.is_thread_file(Path::new("data/last-sizing-thread-2017.json")));
        assert!(!s.is_thread_file(Path::new("data/size-records.json")));
    }
}
