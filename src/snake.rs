use std::collections::{HashSet, VecDeque};

use crate::settings::{INITIAL_SNAKE_LENGTH, MAX_SNAKE_LENGTH};
use crate::types::{Direction, FieldSize, Point, wrapping_dec};

/// Snake body. `body` is ordered with the head at the front; `body_set`
/// mirrors it for O(1) occupancy checks.
#[derive(Clone, Debug)]
pub struct Snake {
    pub body: VecDeque<Point>,
    pub body_set: HashSet<Point>,
    pub direction: Direction,
}

impl Snake {
    /// Places the snake horizontally centered on the field, head at
    /// `(width / 2, height / 2)`, body extending leftward with wrap-around,
    /// heading Right.
    pub fn new(field_size: &FieldSize) -> Self {
        let mut body = VecDeque::with_capacity(INITIAL_SNAKE_LENGTH);
        let mut body_set = HashSet::new();

        let mut x = field_size.width / 2;
        let y = field_size.height / 2;
        for _ in 0..INITIAL_SNAKE_LENGTH {
            let segment = Point::new(x, y);
            body.push_back(segment);
            body_set.insert(segment);
            x = wrapping_dec(x, field_size.width);
        }

        Self {
            body,
            body_set,
            direction: Direction::Right,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<Point> {
        self.body.get(index).copied()
    }

    /// Whether `position` is covered by a body segment at index >= 1. The
    /// head cell is excluded: collision testing always runs against a newly
    /// computed candidate head, never the current one.
    pub fn covers_body(&self, position: Point) -> bool {
        self.body_set.contains(&position) && position != self.head()
    }

    /// Whether any segment, head included, covers `position`.
    pub fn covers(&self, position: Point) -> bool {
        self.body_set.contains(&position)
    }

    /// Moves the head to `new_head`. With `grow` the tail is retained, so the
    /// snake gets one segment longer, unless it is already at
    /// `MAX_SNAKE_LENGTH`.
    pub fn advance(&mut self, new_head: Point, grow: bool) {
        self.body.push_front(new_head);
        self.body_set.insert(new_head);

        if !grow || self.body.len() > MAX_SNAKE_LENGTH {
            let tail = self
                .body
                .pop_back()
                .expect("Snake body should never be empty");
            self.body_set.remove(&tail);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_places_centered_snake() {
        let snake = Snake::new(&FieldSize {
            width: 10,
            height: 10,
        });
        assert_eq!(snake.len(), INITIAL_SNAKE_LENGTH);
        assert_eq!(snake.head(), Point::new(5, 5));
        assert_eq!(snake.segment(1), Some(Point::new(4, 5)));
        assert_eq!(snake.segment(2), Some(Point::new(3, 5)));
        assert_eq!(snake.direction, Direction::Right);
    }

    #[test]
    fn test_new_wraps_body_on_narrow_field() {
        let snake = Snake::new(&FieldSize {
            width: 3,
            height: 3,
        });
        assert_eq!(snake.head(), Point::new(1, 1));
        assert_eq!(snake.segment(1), Some(Point::new(0, 1)));
        assert_eq!(snake.segment(2), Some(Point::new(2, 1)));
    }

    #[test]
    fn test_advance_without_growth_keeps_length() {
        let mut snake = Snake::new(&FieldSize {
            width: 10,
            height: 10,
        });
        snake.advance(Point::new(6, 5), false);
        assert_eq!(snake.len(), INITIAL_SNAKE_LENGTH);
        assert_eq!(snake.head(), Point::new(6, 5));
        assert!(!snake.covers(Point::new(3, 5)));
    }

    #[test]
    fn test_advance_with_growth_retains_tail() {
        let mut snake = Snake::new(&FieldSize {
            width: 10,
            height: 10,
        });
        snake.advance(Point::new(6, 5), true);
        assert_eq!(snake.len(), INITIAL_SNAKE_LENGTH + 1);
        assert!(snake.covers(Point::new(3, 5)));
    }

    #[test]
    fn test_covers_body_excludes_head() {
        let snake = Snake::new(&FieldSize {
            width: 10,
            height: 10,
        });
        assert!(!snake.covers_body(Point::new(5, 5)));
        assert!(snake.covers_body(Point::new(4, 5)));
        assert!(snake.covers(Point::new(5, 5)));
    }
}
