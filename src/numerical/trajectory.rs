/// One sample of the solution curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub step: usize,
    pub x: f64,
    pub y: f64,
}

/// Ordered samples (step, x, y), step 0 is the initial condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Trajectory {
            points: Vec::with_capacity(capacity),
        }
    }

    /// appends a sample; its step index is the current length
    pub fn push(&mut self, x: f64, y: f64) {
        let step = self.points.len();
        self.points.push(TrajectoryPoint { step, x, y });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryPoint> {
        self.points.iter()
    }

    pub fn get(&self, step: usize) -> Option<&TrajectoryPoint> {
        self.points.get(step)
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_numbers_steps() {
        let mut trajectory = Trajectory::with_capacity(3);
        assert!(trajectory.is_empty());
        trajectory.push(0.0, 1.0);
        trajectory.push(0.5, 1.5);
        trajectory.push(1.0, 2.5);
        assert_eq!(trajectory.len(), 3);
        assert_eq!(
            trajectory.get(1),
            Some(&TrajectoryPoint {
                step: 1,
                x: 0.5,
                y: 1.5
            })
        );
        assert_eq!(trajectory.last().map(|p| p.step), Some(2));
        assert_eq!(trajectory.xs(), vec![0.0, 0.5, 1.0]);
        assert_eq!(trajectory.ys(), vec![1.0, 1.5, 2.5]);
        let steps: Vec<usize> = (&trajectory).into_iter().map(|p| p.step).collect();
        assert_eq!(steps, vec![0, 1, 2]);
    }
}
