use chip8vm::config::Args;
use chip8vm::core::processor::Processor;
use chip8vm::core::rom::Rom;
use chip8vm::emulator::Emulator;
use clap::Parser;
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("chip8vm=info"))
        .init();

    let args = Args::parse();
    let rom = Rom::new(&args.rom)?;

    let mut chip8 = Processor::new(args.quirks());
    if let Some(seed) = args.seed {
        chip8 = chip8.with_seed(seed);
    }
    chip8.load(&rom)?;
    info!("loaded {:?} ({} bytes)", args.rom, rom.len());

    let mut emulator = Emulator::new(&args, chip8)?;
    emulator.run()?;
    Ok(())
}
