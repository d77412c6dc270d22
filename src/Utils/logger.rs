use crate::numerical::trajectory::Trajectory;
use csv::Writer;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

const HEADERS: [&str; 3] = ["Step", "x", "y"];

/// tab separated text file with the full precision values
pub fn save_trajectory_to_file(trajectory: &Trajectory, filename: &Path) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "{}", HEADERS.join("\t"))?;
    for point in trajectory {
        writeln!(file, "{}\t{}\t{}", point.step, point.x, point.y)?;
    }
    Ok(())
}

pub fn save_trajectory_to_csv(trajectory: &Trajectory, filename: &Path) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(HEADERS)?;
    for point in trajectory {
        writer.write_record(&[
            point.step.to_string(),
            point.x.to_string(),
            point.y.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// picks the format from the extension: `.csv` -> CSV, anything else -> tab separated
pub fn save_trajectory(trajectory: &Trajectory, filename: &Path) -> io::Result<()> {
    let is_csv = filename
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        save_trajectory_to_csv(trajectory, filename)
    } else {
        save_trajectory_to_file(trajectory, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> Trajectory {
        let mut trajectory = Trajectory::default();
        trajectory.push(0.0, 1.0);
        trajectory.push(0.1, 1.1);
        trajectory.push(0.2, 1.23);
        trajectory
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.csv");
        save_trajectory(&sample(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap(), vec!["Step", "x", "y"]);
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[2][0], "2");
        assert_eq!(rows[2][2].parse::<f64>().unwrap(), 1.23);
    }

    #[test]
    fn test_tab_separated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.txt");
        save_trajectory(&sample(), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Step\tx\ty");
        assert_eq!(lines[1], "0\t0\t1");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("result.csv");
        assert!(save_trajectory(&sample(), &path).is_err());
    }
}
