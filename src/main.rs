fn main() {
    if let Err(e) = terramesh::gpu::run() {
        log::error!("terramesh failed: {}", e);
        eprintln!("terramesh failed: {}", e);
        std::process::exit(1);
    }
}
