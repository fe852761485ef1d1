//! Crate root module declarations for the Quince Chess engine.
//!
//! Exposes the position/attack/move-generation core, the hashing and search
//! layers, and the UCI front end so the binary, tests, and benches can import
//! stable module paths.

pub mod position {
    pub mod board;
    pub mod game;
    pub mod rules;
    pub mod types;
}

pub mod attacks {
    pub mod detection;
    pub mod king;
    pub mod knight;
    pub mod pawn;
    pub mod sliding;
}

pub mod moves {
    pub mod encoding;
}

pub mod movegen {
    pub mod apply;
    pub mod generator;
    pub mod perft;
}

pub mod search {
    pub mod negamax;
    pub mod scoring;
    pub mod zobrist;
}

pub mod uci {
    pub mod protocol;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen;
    pub mod long_algebraic;
    pub mod render;
}
