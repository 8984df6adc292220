use crate::{
    config::Config,
    plan::{PlanError, ScaffoldPlan},
};
use miette::Diagnostic;
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("failed to render template for '{name}'")]
    #[diagnostic(code(andaime::template::render), help("Review the embedded template."))]
    Render {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("failed to serialize the dependency manifest")]
    #[diagnostic(code(andaime::template::manifest))]
    Manifest(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Plan(#[from] PlanError),
}

/// Dependency manifest path, handled by the runner's install phase rather
/// than the plan itself.
pub const MANIFEST_PATH: &str = "composer.json";

pub const DIRECTORIES: [&str; 9] = [
    "app/controllers",
    "app/models",
    "app/views",
    "core",
    "config",
    "public/assets/css",
    "public/assets/js",
    "public/assets/images",
    "routes",
];

const ENV_FILE: &str = "\
DB_HOST={{ db_host }}
DB_NAME={{ db_name }}
DB_USER={{ db_user }}
DB_PASS={{ db_pass }}
BASE_URL={{ base_url }}
";

const CONFIG_PHP: &str = r#"<?php
use Dotenv\Dotenv;

$dotenv = Dotenv::createImmutable(__DIR__ . '/../');
$dotenv->load();

return [
    'db' => [
        'host' => getenv('DB_HOST'),
        'name' => getenv('DB_NAME'),
        'user' => getenv('DB_USER'),
        'pass' => getenv('DB_PASS'),
    ],
    'base_url' => getenv('BASE_URL'),
];
"#;

// The connection handle is constructed by the caller and passed around
// explicitly; the generated skeleton carries no process-wide singleton.
const DATABASE_PHP: &str = r#"<?php
class Database {
    private $pdo;

    public function __construct(array $config) {
        $this->pdo = new PDO(
            'mysql:host=' . $config['host'] . ';dbname=' . $config['name'],
            $config['user'],
            $config['pass']
        );
        $this->pdo->setAttribute(PDO::ATTR_ERRMODE, PDO::ERRMODE_EXCEPTION);
    }

    public function connection() {
        return $this->pdo;
    }
}
"#;

const MODEL_PHP: &str = r#"<?php
class Model {
    protected $db;

    public function __construct(PDO $db) {
        $this->db = $db;
    }
}
"#;

const CONTROLLER_PHP: &str = r#"<?php
class Controller {
    protected function view($view, $data = []) {
        extract($data);
        require __DIR__ . '/../app/views/' . $view . '.php';
    }
}
"#;

const HOME_CONTROLLER_PHP: &str = r#"<?php
require_once __DIR__ . '/../../core/Controller.php';

class HomeController extends Controller {
    public function index() {
        $data = ['title' => 'Página Inicial'];
        $this->view('home', $data);
    }
}
"#;

const USER_MODEL_PHP: &str = r#"<?php
require_once __DIR__ . '/../../core/Model.php';

class User extends Model {
    public function getAllUsers() {
        $stmt = $this->db->query("SELECT * FROM users");
        return $stmt->fetchAll(PDO::FETCH_OBJ);
    }
}
"#;

const HOME_VIEW_PHP: &str = r#"<!DOCTYPE html>
<html lang="pt-br">
<head>
    <meta charset="UTF-8">
    <title><?php echo $title; ?></title>
    <link rel="stylesheet" href="<?php echo getenv('BASE_URL'); ?>assets/css/style.css">
</head>
<body>
    <h1><?php echo $title; ?></h1>
    <p>Bem-vindo ao {{ project_name }}!</p>
    <script src="<?php echo getenv('BASE_URL'); ?>assets/js/script.js"></script>
</body>
</html>
"#;

// Route resolution goes through the explicit table returned by
// routes/web.php; unknown keys fall back to the home handler.
const FRONT_CONTROLLER_PHP: &str = r#"<?php
require __DIR__ . '/../vendor/autoload.php';
require __DIR__ . '/../core/Controller.php';
require __DIR__ . '/../core/Model.php';
require __DIR__ . '/../core/Database.php';
require __DIR__ . '/../app/controllers/HomeController.php';

$dotenv = Dotenv\Dotenv::createImmutable(__DIR__ . '/../');
$dotenv->load();

$routes = require __DIR__ . '/../routes/web.php';

$url = explode('/', $_GET['url'] ?? 'home');
$key = $url[0];

$handler = $routes[$key] ?? $routes['home'];
$handler();
"#;

const ROUTES_PHP: &str = r#"<?php
// Tabela de rotas: chave => handler.
return [
    'home' => function () {
        (new HomeController())->index();
    },
];
"#;

const BASE_STYLESHEET: &str = "/* CSS padrão do projeto */\n";

const BASE_SCRIPT: &str = "// JavaScript padrão do projeto\n";

const FILES: [(&str, &str); 12] = [
    (".env", ENV_FILE),
    ("config/config.php", CONFIG_PHP),
    ("core/Database.php", DATABASE_PHP),
    ("core/Model.php", MODEL_PHP),
    ("core/Controller.php", CONTROLLER_PHP),
    ("app/controllers/HomeController.php", HOME_CONTROLLER_PHP),
    ("app/models/User.php", USER_MODEL_PHP),
    ("app/views/home.php", HOME_VIEW_PHP),
    ("public/index.php", FRONT_CONTROLLER_PHP),
    ("routes/web.php", ROUTES_PHP),
    ("public/assets/css/style.css", BASE_STYLESHEET),
    ("public/assets/js/script.js", BASE_SCRIPT),
];

fn make_context(config: &Config) -> Context {
    let mut context = Context::new();

    context.insert("project_name", &config.project_name);
    context.insert("base_url", &config.base_url);
    context.insert("db_host", &config.database.host);
    context.insert("db_name", &config.database.name);
    context.insert("db_user", &config.database.user);
    context.insert("db_pass", &config.database.pass);

    context
}

/// Renders the dependency manifest declaring the env-loader package and the
/// namespace-to-directory autoload table.
pub fn manifest_content() -> Result<String, TemplateError> {
    let manifest = serde_json::json!({
        "require": {
            "vlucas/phpdotenv": "^5.5"
        },
        "autoload": {
            "psr-4": {
                "App\\": "app/",
                "Core\\": "core/"
            }
        }
    });

    let mut rendered = serde_json::to_string_pretty(&manifest)?;
    rendered.push('\n');

    Ok(rendered)
}

/// Builds the full scaffold plan: every payload is rendered up front against
/// the defaults config, so by the time the runner touches the filesystem the
/// plan holds only concrete bytes.
pub fn build_plan(config: &Config) -> Result<ScaffoldPlan, TemplateError> {
    let context = make_context(config);
    let mut tera = Tera::default();
    let mut plan = ScaffoldPlan::new();

    for directory in DIRECTORIES {
        plan.directory(directory)?;
    }

    for (path, template) in FILES {
        let rendered = tera
            .render_str(template, &context)
            .map_err(|error| TemplateError::Render {
                name: path.to_string(),
                source: error,
            })?;

        plan.file(path, rendered)?;
    }

    Ok(plan)
}
