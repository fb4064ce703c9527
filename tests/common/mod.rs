//! Shared fixtures: SDF records and ensembles.

#![allow(dead_code)]

use fastgrow::EnsembleMember;
use std::path::PathBuf;

/// Minimal SDF record with the given properties, delimiter included.
pub fn sdf_record(name: &str, props: &[(&str, &str)]) -> String {
    let mut s = format!(
        "{name}\n  fastgrow\n\n  1  0  0  0  0  0            999 V2000\n    0.0000    0.0000    0.0000 C   0  0\nM  END\n"
    );
    for (key, value) in props {
        s.push_str(&format!("> <{key}>\n{value}\n\n"));
    }
    s.push_str("$$$$\n");
    s
}

/// Record with only a `Score` property.
pub fn scored(name: &str, score: &str) -> String {
    sdf_record(name, &[("Score", score)])
}

pub fn ensemble(names: &[&str]) -> Vec<EnsembleMember> {
    names
        .iter()
        .map(|n| EnsembleMember {
            name: n.to_string(),
            path: PathBuf::from(format!("{n}.pdb")),
        })
        .collect()
}
