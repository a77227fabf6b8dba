use dotenvy::dotenv;

use campusride::cli;
use campusride::logging::init_tracing;
use campusride::router::init_router;
use campusride::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Maintenance commands short-circuit before the server starts
    if args.len() > 1 && (args[1] == "seed" || args[1] == "create-admin") {
        handle_command(args).await;
        return;
    }

    init_tracing();

    let state = init_app_state().await;

    // Countdown tick for attendance codes: retire overdue entries once a
    // second. Expiry is still re-checked at submission time.
    let codes = state.codes.clone();
    let sweep_interval = state.otp_config.sweep_interval();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(sweep_interval);
        loop {
            tick.tick().await;
            codes.sweep();
        }
    });

    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!("🚀 Server running on http://localhost:3000");
    println!("📚 Swagger UI available at http://localhost:3000/swagger-ui");
    println!("📖 Scalar UI available at http://localhost:3000/scalar");
    axum::serve(listener, app).await.unwrap();
}

async fn handle_command(args: Vec<String>) {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match args[1].as_str() {
        "seed" => match cli::seed_demo_data(&pool).await {
            Ok(_) => println!("✅ Database seeded successfully!"),
            Err(e) => {
                eprintln!("❌ Error seeding database: {}", e);
                std::process::exit(1);
            }
        },
        "create-admin" => {
            if args.len() != 5 {
                eprintln!("Usage: {} create-admin <name> <email> <password>", args[0]);
                std::process::exit(1);
            }

            match cli::create_admin(&pool, &args[2], &args[3], &args[4]).await {
                Ok(_) => {
                    println!("✅ Admin created successfully!");
                    println!("   Email: {}", args[3]);
                    println!("   Name: {}", args[2]);
                }
                Err(e) => {
                    eprintln!("❌ Error creating admin: {}", e);
                    std::process::exit(1);
                }
            }
        }
        _ => unreachable!(),
    }
}
