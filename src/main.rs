#![warn(clippy::pedantic)]
#![warn(clippy::dbg_macro)]
#![deny(clippy::deref_by_slicing)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::todo)]
#![warn(clippy::unimplemented)]
#![warn(clippy::unwrap_used)]

use clap::Parser;
use std::{
	fs,
	io::{self, Read, Write},
	path::PathBuf,
	process,
};

#[derive(Parser)]
struct Args {
	/// Schedule document to read; stdin when omitted.
	#[arg(env = "WEEKPLAN_DOCUMENT")]
	input: Option<PathBuf>,
}

fn main() {
	let Args { input } = Args::parse();
	let document = match &input {
		Some(path) => fs::read(path).expect("read schedule document"),
		None => {
			let mut buffer = Vec::new();
			io::stdin()
				.read_to_end(&mut buffer)
				.expect("read schedule document from stdin");
			buffer
		}
	};
	match weekplan::compute(&document) {
		Ok(schedule) => {
			let mut stdout = io::stdout().lock();
			stdout.write_all(&schedule).expect("write schedule");
			stdout.write_all(b"\n").expect("write schedule");
		}
		Err(error) => {
			eprintln!("weekplan: {error}");
			process::exit(1);
		}
	}
}
