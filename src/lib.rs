//! Движок No-Limit Texas Hold'em для одного или нескольких столов.
//!
//! Слои:
//! - `domain` – карты, фишки, колода, игроки, стол;
//! - `eval` – оценка и сравнение рук;
//! - `engine` – раздача, ставки, сайд-поты, шоудаун, менеджер столов;
//! - `bot` – эвристика для мест без живого игрока;
//! - `time_ctrl` – таймер хода (вызывается снаружи движка);
//! - `infra` – RNG, ID, внешний учёт балансов;
//! - `api` – команды, снимок стола, ошибки для клиента.

pub mod api;
pub mod bot;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod time_ctrl;
