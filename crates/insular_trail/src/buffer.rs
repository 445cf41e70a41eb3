//! Bounded trail of recent brush samples

use std::collections::VecDeque;

use insular_core::{Color, Point};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailNode {
    pub position: Point,
    pub angle: f32,
    /// Normalised speed, 0..1
    pub speed_norm: f32,
    pub color: Color,
}

/// Ring of trail samples, oldest first
#[derive(Clone, Debug, Default)]
pub struct TrailBuffer {
    nodes: VecDeque<TrailNode>,
}

impl TrailBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, evicting the oldest until at most `capacity` remain
    pub fn push(&mut self, node: TrailNode, capacity: usize) {
        self.nodes.push_back(node);
        while self.nodes.len() > capacity {
            self.nodes.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Samples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TrailNode> {
        self.nodes.iter()
    }

    /// Samples paired with their age, 1 for the oldest and 0 for the newest
    pub fn aged(&self) -> impl Iterator<Item = (f32, &TrailNode)> {
        let span = self.nodes.len().saturating_sub(1).max(1) as f32;
        let newest = self.nodes.len().saturating_sub(1);
        self.nodes
            .iter()
            .enumerate()
            .map(move |(i, node)| ((newest - i) as f32 / span, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f32) -> TrailNode {
        TrailNode {
            position: Point::new(x, 0.0),
            angle: 0.0,
            speed_norm: 0.0,
            color: Color::WHITE,
        }
    }

    #[test]
    fn test_oldest_evicted() {
        let mut buffer = TrailBuffer::new();
        for i in 0..30 {
            buffer.push(node(i as f32), 24);
        }
        assert_eq!(buffer.len(), 24);
        let xs: Vec<f32> = buffer.iter().map(|n| n.position.x).collect();
        assert_eq!(xs.first(), Some(&6.0));
        assert_eq!(xs.last(), Some(&29.0));

        // scroll capacity drops the backlog at once
        buffer.push(node(30.0), 6);
        assert_eq!(buffer.len(), 6);
        assert_eq!(buffer.iter().next().map(|n| n.position.x), Some(25.0));
    }

    #[test]
    fn test_ages() {
        let mut buffer = TrailBuffer::new();
        buffer.push(node(0.0), 24);
        assert_eq!(buffer.aged().next().map(|(age, _)| age), Some(0.0));

        for i in 1..5 {
            buffer.push(node(i as f32), 24);
        }
        let ages: Vec<f32> = buffer.aged().map(|(age, _)| age).collect();
        assert_eq!(ages, vec![1.0, 0.75, 0.5, 0.25, 0.0]);
    }
}
