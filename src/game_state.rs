use crate::log;
use crate::session_rng::SessionRng;
use crate::settings::{FOOD_VALUE, GameSettings};
use crate::snake::Snake;
use crate::types::{Direction, FieldSize, Food, Point, wrapping_dec, wrapping_inc};

const FOOD_SPAWN_ATTEMPTS: u32 = 100;

/// Single-player snake engine on a toroidal grid. The host owns the tick
/// cadence and the random source; every operation here is synchronous and
/// completes in bounded time.
#[derive(Clone, Debug)]
pub struct GameState {
    snake: Snake,
    food: Food,
    field_size: FieldSize,
    score: u32,
    game_over: bool,
}

impl GameState {
    pub fn new(settings: &GameSettings, rng: &mut SessionRng) -> Self {
        let field_size = settings.field_size();
        let mut state = Self {
            snake: Snake::new(&field_size),
            food: Food {
                position: Point::new(0, 0),
                value: FOOD_VALUE,
            },
            field_size,
            score: 0,
            game_over: false,
        };
        state.spawn_food(rng);
        state
    }

    /// Advances the game by one tick. Returns whether any state changed,
    /// which is false only when the game is already over.
    pub fn update(&mut self, rng: &mut SessionRng) -> bool {
        if self.game_over {
            return false;
        }

        let next_head = self.next_head_position();

        // Collision is checked against the pre-move body, tail included: the
        // tail cell vacates this tick, but entering it still ends the game.
        if self.check_self_collision(next_head) {
            self.game_over = true;
            log!(
                "Snake hit itself at ({}, {}). Final score: {}",
                next_head.x,
                next_head.y,
                self.score
            );
            return true;
        }

        let eaten = self.is_food_position(next_head);
        if eaten {
            self.score += self.food.value;
            log!(
                "Ate food at ({}, {}). Score: {}",
                next_head.x,
                next_head.y,
                self.score
            );
            self.spawn_food(rng);
        }

        self.snake.advance(next_head, eaten);
        true
    }

    /// Sets the heading immediately. Exact 180-degree reversals are ignored.
    /// There is no game-over guard: changing direction after the game ended
    /// is a harmless no-op because `update` no longer moves the snake.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction.is_opposite(&self.snake.direction) {
            return;
        }
        self.snake.direction = new_direction;
    }

    /// Whether `position` collides with a body segment at index >= 1.
    pub fn check_self_collision(&self, position: Point) -> bool {
        self.snake.covers_body(position)
    }

    pub fn is_food_position(&self, position: Point) -> bool {
        self.food.position == position
    }

    /// Places a new food item on a cell the snake does not occupy: up to 100
    /// uniform random candidates, then an exhaustive row-major scan. On a
    /// fully occupied board the previous food is left untouched.
    pub fn spawn_food(&mut self, rng: &mut SessionRng) {
        for _ in 0..FOOD_SPAWN_ATTEMPTS {
            let position = Point::new(
                rng.random_range(0..self.field_size.width),
                rng.random_range(0..self.field_size.height),
            );
            if !self.snake.covers(position) {
                self.place_food(position);
                return;
            }
        }

        for y in 0..self.field_size.height {
            for x in 0..self.field_size.width {
                let position = Point::new(x, y);
                if !self.snake.covers(position) {
                    self.place_food(position);
                    return;
                }
            }
        }

        log!("No free cell for food, keeping previous position");
    }

    fn place_food(&mut self, position: Point) {
        self.food = Food {
            position,
            value: FOOD_VALUE,
        };
        log!("Food spawned at ({}, {})", position.x, position.y);
    }

    /// Reinitializes the game with the current field bounds, drawing fresh
    /// food placement from the same random source.
    pub fn reset(&mut self, rng: &mut SessionRng) {
        let settings = GameSettings::new(self.field_size.width, self.field_size.height);
        *self = Self::new(&settings, rng);
    }

    pub fn snake_segment(&self, index: usize) -> Option<Point> {
        self.snake.segment(index)
    }

    pub fn snake_length(&self) -> usize {
        self.snake.len()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn food_position(&self) -> Point {
        self.food.position
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn field_size(&self) -> FieldSize {
        self.field_size
    }

    fn next_head_position(&self) -> Point {
        let head = self.snake.head();
        match self.snake.direction {
            Direction::Up => Point::new(head.x, wrapping_dec(head.y, self.field_size.height)),
            Direction::Down => Point::new(head.x, wrapping_inc(head.y, self.field_size.height)),
            Direction::Left => Point::new(wrapping_dec(head.x, self.field_size.width), head.y),
            Direction::Right => Point::new(wrapping_inc(head.x, self.field_size.width), head.y),
        }
    }

    #[cfg(test)]
    fn set_body(&mut self, segments: &[Point]) {
        self.snake.body = segments.iter().copied().collect();
        self.snake.body_set = segments.iter().copied().collect();
    }

    #[cfg(test)]
    fn set_food(&mut self, position: Point) {
        self.food = Food {
            position,
            value: FOOD_VALUE,
        };
    }
}
