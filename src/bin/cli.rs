use clap::Parser;
use mapgen::{Faction, GenerationParams, generate_batch};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Генератор стартовых карт для пошаговой игры о территориях
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (флаги ниже имеют приоритет)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Сторона карты в клетках (по умолчанию: 16)
    #[arg(long)]
    size: Option<usize>,

    /// Начальная доля суши (по умолчанию: 0.5)
    #[arg(long)]
    land: Option<f64>,

    /// Количество итераций сглаживания (по умолчанию: 3)
    #[arg(long)]
    smooth: Option<u32>,

    /// Уровень рельефа (по умолчанию: 4)
    #[arg(long)]
    relief: Option<u32>,

    /// Список фракций через пробел (по умолчанию: Vengir Bardur Oumaji)
    #[arg(long, num_args = 1..)]
    tribes: Option<Vec<Faction>>,

    /// Сид генератора (по умолчанию: случайный)
    #[arg(long)]
    seed: Option<u64>,

    /// Режим обучения: сплошная суша и редкие горы
    #[arg(long)]
    training: bool,

    /// Сколько карт сгенерировать (сиды идут подряд)
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Выводить весь документ (сид, столицы), а не только массив клеток
    #[arg(long)]
    full: bool,

    /// Форматированный JSON
    #[arg(long)]
    pretty: bool,

    /// Путь для сохранения JSON (по умолчанию: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn params(&self) -> Result<GenerationParams, Box<dyn std::error::Error>> {
        let mut params = match &self.config {
            Some(path) => GenerationParams::from_toml_file(path)?,
            None => GenerationParams::default(),
        };

        if let Some(size) = self.size {
            params.size = size;
        }
        if let Some(land) = self.land {
            params.initial_land = land;
        }
        if let Some(smooth) = self.smooth {
            params.smoothing = smooth;
        }
        if let Some(relief) = self.relief {
            params.relief = relief;
        }
        if let Some(tribes) = &self.tribes {
            params.factions.clone_from(tribes);
        }
        if self.seed.is_some() {
            params.seed = self.seed;
        }
        if self.training {
            params = params.into_training();
        }
        Ok(params)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Логи идут в stderr, чтобы не смешиваться с JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let params = cli.params()?;
    let maps = generate_batch(&params, cli.count)?;

    let document = if cli.full {
        if let [map] = maps.as_slice() {
            serde_json::to_value(map)?
        } else {
            serde_json::to_value(&maps)?
        }
    } else if let [map] = maps.as_slice() {
        serde_json::to_value(&map.tiles)?
    } else {
        let tiles: Vec<_> = maps.iter().map(|map| &map.tiles).collect();
        serde_json::to_value(tiles)?
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, json)?;
            tracing::info!(path = %path.display(), maps = maps.len(), "map saved");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
