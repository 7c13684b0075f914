//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements   | Connects to                       |
//! |-------------|--------------|-----------------------------------|
//! | `log_sink`  | EventSink    | `log` facade                      |
//! | `rpi`       | GpioBackend  | Raspberry Pi GPIO (feature `rpi`) |
//! | `sim_board` | GpioBackend  | In-process door simulation        |
//! | `time`      | Clock        | System clock / simulated clock    |

pub mod log_sink;
#[cfg(feature = "rpi")]
pub mod rpi;
pub mod sim_board;
pub mod time;
