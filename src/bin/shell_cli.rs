#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("shell_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shell_engine::geom::{GeomMesh, ScaleRule};
    use shell_engine::shell::{
        ShellMeshOptions, ShellParameter, ShellParameters, ShellPreset, SimilarityThresholds,
        distance, first_mismatch, shell_mesh,
    };
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};
    use time::OffsetDateTime;

    const USAGE: &str = r#"shell_cli (shell-engine)

USAGE:
  shell_cli list
  shell_cli mesh <shell1..shell4|random> [options]
  shell_cli compare <a> <b> [--seed <n>]

OPTIONS (mesh):
  --divisions <n>    Grid subdivisions per axis (default 100)
  --seed <n>         Seed for `random`
  --scale <rule>     `largest` (default) or `z`
  --obj <path>       Output path (default shell-<yyyymd>_<unix>.obj)
  --overwrite        Overwrite an existing output file
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_presets();
                Ok(())
            }
            "mesh" => cmd_mesh(&mut args),
            "compare" => cmd_compare(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_presets() {
        for preset in ShellPreset::ALL {
            println!("{preset}: {}", ShellParameters::preset(preset));
        }
    }

    /// Where a parameter set comes from on the command line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Source {
        Preset(ShellPreset),
        Random,
    }

    impl Source {
        fn parse(name: &str) -> Result<Self, String> {
            if name.eq_ignore_ascii_case("random") {
                return Ok(Self::Random);
            }
            name.parse::<ShellPreset>()
                .map(Self::Preset)
                .map_err(|err| format!("{err} or `random`"))
        }

        fn resolve(self, rng: &mut StdRng) -> ShellParameters {
            match self {
                Self::Preset(preset) => ShellParameters::preset(preset),
                Self::Random => ShellParameters::random_with(rng),
            }
        }
    }

    fn seeded_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    fn cmd_mesh(args: &mut Args) -> Result<(), String> {
        let source = Source::parse(&args.next().ok_or("missing shell name")?)?;

        let mut options = ShellMeshOptions::default();
        let mut seed: Option<u64> = None;
        let mut obj_path: Option<PathBuf> = None;
        let mut overwrite = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--divisions" => {
                    options.divisions = parse_number(&args.value("--divisions")?, "--divisions")?;
                }
                "--seed" => seed = Some(parse_number(&args.value("--seed")?, "--seed")?),
                "--scale" => options.scale_rule = args.value("--scale")?.parse::<ScaleRule>()?,
                "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--overwrite" => overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let params = source.resolve(&mut seeded_rng(seed));
        let (mesh, diagnostics) = shell_mesh(&params, &options);

        let path = obj_path.unwrap_or_else(|| PathBuf::from(export_file_name(export_time())));
        write_obj_file(&path, &mesh.surface, &params, overwrite)?;

        println!("parameters: {params}");
        print!("{diagnostics}");
        println!("wrote {}", path.display());
        Ok(())
    }

    fn cmd_compare(args: &mut Args) -> Result<(), String> {
        let a = Source::parse(&args.next().ok_or("missing first shell")?)?;
        let b = Source::parse(&args.next().ok_or("missing second shell")?)?;

        let mut seed: Option<u64> = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => seed = Some(parse_number(&args.value("--seed")?, "--seed")?),
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let mut rng = seeded_rng(seed);
        let p = a.resolve(&mut rng);
        let q = b.resolve(&mut rng);

        println!("a: {p}");
        println!("b: {q}");
        println!("distance: {:.6}", distance(&p, &q));
        match first_mismatch(&p, &q, &SimilarityThresholds::GAME) {
            None => println!("similar: yes"),
            Some(m) => println!(
                "similar: no ({} differs by {:.4}, allowed {})",
                m.parameter, m.difference, m.threshold
            ),
        }
        for &(param, threshold) in SimilarityThresholds::GAME.entries {
            println!("  {:<6} |d| = {:<10.4} <= {threshold}", param.name(), diff(&p, &q, param));
        }
        Ok(())
    }

    fn diff(p: &ShellParameters, q: &ShellParameters, param: ShellParameter) -> f64 {
        (p.get(param) - q.get(param)).abs()
    }

    fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, String> {
        value
            .parse()
            .map_err(|_| format!("invalid value `{value}` for {flag}"))
    }

    /// Local wall-clock time, or UTC when the local offset cannot be determined.
    fn export_time() -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    /// `shell-<year><month><day>_<unix seconds>.obj`, month and day unpadded.
    /// The date is taken in `at`'s own offset.
    pub(crate) fn export_file_name(at: OffsetDateTime) -> String {
        format!(
            "shell-{}{}{}_{}.obj",
            at.year(),
            u8::from(at.month()),
            at.day(),
            at.unix_timestamp()
        )
    }

    fn write_obj_file(
        path: &Path,
        mesh: &GeomMesh,
        params: &ShellParameters,
        overwrite: bool,
    ) -> Result<(), String> {
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;

        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);

        writeln!(w, "# shell-engine shell_cli").map_err(|e| format!("write obj: {e}"))?;
        writeln!(w, "# {params}").map_err(|e| format!("write obj: {e}"))?;
        writeln!(w, "o shell").map_err(|e| format!("write obj: {e}"))?;

        for p in mesh.positions.iter().copied() {
            writeln!(w, "v {} {} {}", p[0], p[1], p[2]).map_err(|e| format!("write obj: {e}"))?;
        }

        if let Some(uvs) = mesh.uvs.as_ref() {
            for uv in uvs.iter().copied() {
                writeln!(w, "vt {} {}", uv[0], uv[1]).map_err(|e| format!("write obj: {e}"))?;
            }
        }

        if let Some(normals) = mesh.normals.as_ref() {
            for n in normals.iter().copied() {
                writeln!(w, "vn {} {} {}", n[0], n[1], n[2]).map_err(|e| format!("write obj: {e}"))?;
            }
        }

        let has_uvs = mesh.uvs.is_some();
        let has_normals = mesh.normals.is_some();

        for tri in mesh.indices.chunks_exact(3) {
            let a = tri[0] + 1;
            let b = tri[1] + 1;
            let c = tri[2] + 1;

            match (has_uvs, has_normals) {
                (true, true) => writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}"),
                (true, false) => writeln!(w, "f {a}/{a} {b}/{b} {c}/{c}"),
                (false, true) => writeln!(w, "f {a}//{a} {b}//{b} {c}//{c}"),
                (false, false) => writeln!(w, "f {a} {b} {c}"),
            }
            .map_err(|e| format!("write obj: {e}"))?;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }

}
