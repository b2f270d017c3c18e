//! Инфраструктура вокруг движка:
//! - генерация ID игроков;
//! - RNG-реализации (кнопка в первой раздаче);
//! - снэпшот сессии и абстракция хранения (перезагрузка страницы, тесты).

pub mod ids;
pub mod persistence;
pub mod rng;

pub use ids::*;
pub use persistence::*;
pub use rng::*;
