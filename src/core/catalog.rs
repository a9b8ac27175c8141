// File: src/core/catalog.rs
use crate::core::types::{Icon, QuestionAnswer, Section, Topic};
use crate::error::{GuideError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The immutable content tree. Built once at start-up and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    topics: Vec<Topic>,
}

impl Catalog {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    /// The hand-authored catalog shipped with the binary.
    pub fn builtin() -> Self {
        Self::new(builtin_topics())
    }

    /// Loads a catalog from a JSON array of topics with the same shape as the
    /// built-in one.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let topics: Vec<Topic> = serde_json::from_reader(reader).map_err(|e| GuideError::Catalog {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::info!("Loaded {} topics from '{}'", topics.len(), path.display());
        Ok(Self::new(topics))
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn topic(id: &str, title: &str, icon: Icon, sections: Vec<Section>) -> Topic {
    Topic {
        id: id.to_string(),
        title: title.to_string(),
        icon,
        sections,
    }
}

fn section(id: &str, title: &str, content: Vec<QuestionAnswer>) -> Section {
    Section {
        id: id.to_string(),
        title: title.to_string(),
        content,
    }
}

fn qa(question: &str, answer: &str, code_example: &str) -> QuestionAnswer {
    QuestionAnswer {
        question: question.to_string(),
        answer: answer.to_string(),
        code_example: Some(code_example.to_string()),
        practice_exercise: None,
    }
}

// Section ids are shared by `spring-boot` and `microservices` ("basics").
fn builtin_topics() -> Vec<Topic> {
    vec![
        topic(
            "java-core",
            "Core Java",
            Icon::Coffee,
            vec![section(
                "oop",
                "OOP Principles",
                vec![qa(
                    "Can you explain the four pillars of OOP with examples?",
                    "The four pillars of Object-Oriented Programming (OOP) are:

1. Encapsulation: Bundling data and methods that operate on that data within a single unit.
2. Inheritance: Mechanism that allows a class to inherit properties and methods from another class.
3. Polymorphism: Ability of objects to take multiple forms.
4. Abstraction: Hiding complex implementation details and showing only necessary features.",
                    "// Encapsulation Example
public class BankAccount {
    private double balance;

    public void deposit(double amount) {
        if (amount > 0) {
            balance += amount;
        }
    }
}",
                )],
            )],
        ),
        topic(
            "spring-boot",
            "Spring Boot",
            Icon::Server,
            vec![section(
                "basics",
                "Spring Boot Basics",
                vec![qa(
                    "What is Spring Boot and its key features?",
                    "Spring Boot is a framework that simplifies the development of Spring applications. Key features include:

1. Auto-configuration
2. Standalone applications
3. Embedded servers
4. Production-ready features
5. No code generation and no XML configuration",
                    "@SpringBootApplication
public class MyApplication {
    public static void main(String[] args) {
        SpringApplication.run(MyApplication.class, args);
    }
}",
                )],
            )],
        ),
        topic(
            "spring-mvc",
            "Spring MVC",
            Icon::GitBranch,
            vec![section(
                "architecture",
                "MVC Architecture",
                vec![qa(
                    "What is Spring MVC architecture?",
                    "Spring MVC follows the Model-View-Controller pattern:

1. Model: Represents data and business logic
2. View: Handles data presentation
3. Controller: Manages user interaction",
                    "@Controller
public class UserController {
    @GetMapping(\"/users\")
    public String listUsers(Model model) {
        model.addAttribute(\"users\", userService.getAllUsers());
        return \"users\";
    }
}",
                )],
            )],
        ),
        topic(
            "hibernate",
            "Hibernate",
            Icon::Database,
            vec![section(
                "orm",
                "ORM Basics",
                vec![qa(
                    "What is Hibernate, and why is it used?",
                    "Hibernate is an ORM (Object-Relational Mapping) framework that simplifies database interactions in Java. Key benefits:

- Reduces boilerplate JDBC code
- Provides automatic transaction management
- Supports caching and performance optimizations",
                    "@Entity
@Table(name = \"users\")
public class User {
    @Id
    @GeneratedValue(strategy = GenerationType.IDENTITY)
    private Long id;

    private String name;
    private String email;
}",
                )],
            )],
        ),
        topic(
            "microservices",
            "Microservices",
            Icon::Settings,
            vec![section(
                "basics",
                "Microservices Architecture",
                vec![qa(
                    "What are microservices, and how do they differ from monolithic applications?",
                    "Microservices is an architectural style that structures an application as a collection of small, independent services. Key differences:

- Microservices are loosely coupled, whereas monolithic apps are tightly coupled.
- Each microservice can be developed, deployed, and scaled independently.
- Microservices communicate via APIs, often using REST or messaging queues.",
                    "@RestController
@RequestMapping(\"/products\")
public class ProductService {
    @GetMapping
    public List<Product> getAllProducts() {
        return productService.getAllProducts();
    }
}",
                )],
            )],
        ),
        topic(
            "docker",
            "Docker",
            Icon::FileCode,
            vec![section(
                "containers",
                "Understanding Containers",
                vec![qa(
                    "What is Docker, and why is it used?",
                    "Docker is a platform for developing, shipping, and running applications inside lightweight, portable containers. Key advantages:

- Eliminates \"works on my machine\" issues
- Simplifies dependency management
- Enables microservices architecture",
                    "# Dockerfile
FROM openjdk:11
COPY myapp.jar /app.jar
ENTRYPOINT [\"java\", \"-jar\", \"/app.jar\"]",
                )],
            )],
        ),
        topic(
            "kafka",
            "Apache Kafka",
            Icon::Code,
            vec![section(
                "message-queue",
                "Kafka Basics",
                vec![qa(
                    "What is Apache Kafka, and how does it work?",
                    "Kafka is a distributed event streaming platform used for real-time data processing. It consists of:

- Producers: Publish messages to topics.
- Brokers: Manage topics and store messages.
- Consumers: Subscribe to topics and process messages.",
                    "@KafkaListener(topics = \"my-topic\", groupId = \"my-group\")
public void listen(String message) {
    System.out.println(\"Received: \" + message);
}",
                )],
            )],
        ),
        topic(
            "git",
            "Git & GitHub",
            Icon::GitBranch,
            vec![section(
                "version-control",
                "Version Control with Git",
                vec![qa(
                    "What is Git, and why is it important?",
                    "Git is a distributed version control system that helps developers track changes in their code. Key concepts:

- Repositories store project history.
- Branching allows parallel development.
- Commits capture snapshots of changes.",
                    "git init
git add .
git commit -m \"Initial commit\"
git push origin main",
                )],
            )],
        ),
        topic(
            "design-patterns",
            "Design Patterns",
            Icon::Brain,
            vec![section(
                "singleton",
                "Singleton Pattern",
                vec![qa(
                    "What is the Singleton Pattern, and where is it used?",
                    "The Singleton Pattern ensures that a class has only one instance and provides a global point of access. It is often used for logging, database connections, and configuration management.",
                    "public class Singleton {
    private static Singleton instance;

    private Singleton() {}

    public static Singleton getInstance() {
        if (instance == null) {
            instance = new Singleton();
        }
        return instance;
    }
}",
                )],
            )],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_has_nine_topics_in_authored_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog.topics().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "java-core",
                "spring-boot",
                "spring-mvc",
                "hibernate",
                "microservices",
                "docker",
                "kafka",
                "git",
                "design-patterns"
            ]
        );
    }

    #[test]
    fn answers_keep_line_breaks() {
        let catalog = Catalog::builtin();
        let answer = &catalog.topics()[0].sections[0].content[0].answer;
        assert!(answer.contains("\n\n1. Encapsulation"));
    }

    #[test]
    fn from_file_reads_topic_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"rust","title":"Rust","icon":"book","sections":[
                {{"id":"own","title":"Ownership","content":[
                    {{"question":"What moves?","answer":"Values.",
                      "practiceExercise":{{"question":"Q","hint":"H","solution":"S"}}}}]}}]}}]"#
        )
        .unwrap();

        let catalog = Catalog::from_file(file.path()).unwrap();
        let qa = &catalog.topics()[0].sections[0].content[0];
        assert_eq!(qa.practice_exercise.as_ref().unwrap().hint, "H");
        assert!(qa.code_example.is_none());
    }

    #[test]
    fn from_file_rejects_wrong_shape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"topics": 3}}"#).unwrap();
        let err = Catalog::from_file(file.path()).unwrap_err();
        assert!(matches!(err, GuideError::Catalog { .. }));
    }
}
