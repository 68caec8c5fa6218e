#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use customer_remap::domain::RemapConfig;
use tempfile::TempDir;

pub const INPUT_CSV: &str = "\
CustomerCode,CustomerName,CustomerAdd1,CustomerAdd2,CustomerAdd3,CustomerAdd4,CustomerTel,CustomerDebtorCodeNew,customerDebtorCode,areaCode,zone
C001,Kedai Runcit Ah Seng,123 Jalan X,56100 KL,,,03-9131 0000,D-NEW-1,D-OLD-1,KL1,CENTRAL
C002,   ,10 ABC 50000 Road 60000,,,,,,D-OLD-2,,
C003,Perlis Trading,Lot 7,Jalan Besar,01000 Kangar,Perlis,,,,,
C004,No Code Sdn Bhd,Block 12345678 Road,,,,,,,,
";

pub const REFERENCE_TSV: &str = "\
Postcode\tCity\tState
56100\tCheras\tKuala Lumpur
60000\tKuala Lumpur\tWilayah Persekutuan
1000\tKangar\tPerlis
";

pub struct Fixture {
    _tmp: TempDir,
    pub input: PathBuf,
    pub reference: PathBuf,
    pub out_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_input(INPUT_CSV)
    }

    pub fn with_input(input_csv: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let input = tmp.path().join("customers.csv");
        let reference = tmp.path().join("db.csv");
        let out_dir = tmp.path().join("out");
        fs::write(&input, input_csv).expect("write input");
        fs::write(&reference, REFERENCE_TSV).expect("write reference");
        fs::create_dir_all(&out_dir).expect("create out dir");
        Self {
            _tmp: tmp,
            input,
            reference,
            out_dir,
        }
    }

    pub fn config(&self) -> RemapConfig {
        RemapConfig {
            input_path: self.input.clone(),
            reference_path: self.reference.clone(),
            output_dir: self.out_dir.clone(),
            ..RemapConfig::default()
        }
    }

    pub fn output_files(&self) -> Vec<PathBuf> {
        list_files(&self.out_dir)
    }
}

pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read out dir")
        .map(|e| e.expect("dir entry").path())
        .collect();
    files.sort();
    files
}
