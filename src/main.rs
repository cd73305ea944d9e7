use qsecure::secure;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let message: [u8; 16] = [0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1];
    println!("Original message bits: {message:?}");

    let mut rng = rand::rng();
    match secure::transmit(&message, &mut rng) {
        Ok(result) => {
            println!("Shared key bits:       {:?}", result.key);
            println!("Received message bits: {:?}", result.received);

            if result.complete {
                println!("Transmission successful: {}", result.success);
            } else {
                println!("Transmission incomplete: key length was insufficient.");
            }

            if let Some(first) = result.sessions.first() {
                println!("Example teleportation session:");
                println!("{}", first.render_trace());
            }
        }
        Err(err) => println!("Transmission failed: {err}"),
    }
}
