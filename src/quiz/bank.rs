//! Built-in question banks
//!
//! Two topic banks for the main quiz and a separate Java/OOP bank used by the
//! block-stack penalty overlay.

use super::question::{Question, QuestionBank};

/// Points per topic question
pub const TOPIC_QUESTION_POINTS: u32 = 2;

/// Topic banks shown on the topic selection screen
pub fn topic_banks() -> Vec<QuestionBank> {
    vec![variables(), oop()]
}

fn topic(prompt: &str, code: &str, options: &[&str], correct: usize) -> Question {
    Question::new(prompt, options, correct, TOPIC_QUESTION_POINTS).with_code(code)
}

pub fn variables() -> QuestionBank {
    QuestionBank::new(
        "variables",
        vec![
            topic(
                "What will be the output of this code?",
                "int x = 5;\ndouble y = x / 2;\nSystem.out.println(y);",
                &["2.5", "2.0", "2", "Error"],
                1,
            ),
            topic(
                "What will be the output of this code?",
                "int a = 7;\nint b = a++ + ++a;\nSystem.out.println(b);",
                &["14", "15", "16", "17"],
                2,
            ),
            topic(
                "Which line fails to compile?",
                "int count = 10;\nlong total = count;\nint back = total;\nfloat f = 1.5f;",
                &["Line 1", "Line 2", "Line 3", "Line 4"],
                2,
            ),
            topic(
                "What will be the output of this code?",
                "char c = 'A';\nc += 2;\nSystem.out.println(c);",
                &["C", "67", "A2", "Error"],
                0,
            ),
            topic(
                "What is the default value of this field?",
                "class Box {\n  boolean open;\n}",
                &["true", "false", "null", "0"],
                1,
            ),
            topic(
                "What will be the output of this code?",
                "String s = \"5\" + 3 + 2;\nSystem.out.println(s);",
                &["10", "532", "55", "Error"],
                1,
            ),
            topic(
                "What will be the output of this code?",
                "final int max = 3;\nint[] nums = new int[max];\nSystem.out.println(nums.length);",
                &["0", "2", "3", "Error"],
                2,
            ),
            topic(
                "What will be the output of this code?",
                "byte b = (byte) 130;\nSystem.out.println(b);",
                &["130", "-126", "126", "Error"],
                1,
            ),
        ],
    )
}

pub fn oop() -> QuestionBank {
    QuestionBank::new(
        "oop",
        vec![
            topic(
                "Which line contains an error in this class definition?",
                "public class Car {\n  private String model;\n  public void setModel(String model) {\n    model = model;\n  }\n}",
                &["Line 1", "Line 2", "Line 3", "Line 4"],
                3,
            ),
            topic(
                "What will be the output of this code?",
                "class A { String name() { return \"A\"; } }\nclass B extends A { String name() { return \"B\"; } }\nA obj = new B();\nSystem.out.println(obj.name());",
                &["A", "B", "AB", "Error"],
                1,
            ),
            topic(
                "Which keyword prevents a class from being extended?",
                "public ___ class Config { }",
                &["static", "private", "final", "sealed"],
                2,
            ),
            topic(
                "What does this constructor call do?",
                "class Dog extends Animal {\n  Dog() {\n    super(\"dog\");\n  }\n}",
                &[
                    "Calls the Animal constructor",
                    "Creates a second Dog",
                    "Calls a static method",
                    "Nothing",
                ],
                0,
            ),
            topic(
                "Which statement about this interface is true?",
                "interface Shape {\n  double area();\n}",
                &[
                    "area() is private",
                    "area() is implicitly public and abstract",
                    "Shape can be instantiated",
                    "area() must be static",
                ],
                1,
            ),
            topic(
                "What will be the output of this code?",
                "class Counter {\n  static int n = 0;\n  Counter() { n++; }\n}\nnew Counter(); new Counter();\nSystem.out.println(Counter.n);",
                &["0", "1", "2", "Error"],
                2,
            ),
            topic(
                "Which line fails to compile?",
                "abstract class Animal {\n  abstract void speak();\n}\nAnimal a = new Animal();",
                &["Line 1", "Line 2", "Line 3", "Line 4"],
                3,
            ),
            topic(
                "Which principle does this class demonstrate?",
                "class Account {\n  private double balance;\n  public double getBalance() { return balance; }\n}",
                &["Inheritance", "Encapsulation", "Polymorphism", "Recursion"],
                1,
            ),
        ],
    )
}

/// Questions asked when the block stack crosses its target score
pub fn penalty_bank() -> QuestionBank {
    QuestionBank::new(
        "java",
        vec![
            Question::new(
                "In Java, which class is used to create a file?",
                &["File", "FileWriter", "FileReader", "FileCreator"],
                0,
                1,
            ),
            Question::new(
                "Which method is used to write data to a file using FileOutputStream?",
                &["writeFile()", "write()", "writeBytes()", "writeData()"],
                1,
                1,
            ),
            Question::new(
                "What is the correct way to declare a 2D array in Java?",
                &[
                    "int array[][] = new int[][];",
                    "int[][] array = new int[3][3];",
                    "int[3][3] array = new int;",
                    "array int[][] = new int[3][3];",
                ],
                1,
                1,
            ),
            Question::new(
                "Which Java GUI component is used to display multiple lines of text?",
                &["JLabel", "JTextField", "JTextArea", "JText"],
                2,
                1,
            ),
            Question::new(
                "Which JDBC method is used to execute an SQL query?",
                &["executeQuery()", "runQuery()", "submitQuery()", "performQuery()"],
                0,
                1,
            ),
            Question::new(
                "In OOP, what is the process of hiding internal details and showing only functionality called?",
                &["Inheritance", "Polymorphism", "Encapsulation", "Abstraction"],
                2,
                1,
            ),
            Question::new(
                "Which layout manager arranges components in a grid?",
                &["FlowLayout", "BorderLayout", "GridLayout", "BoxLayout"],
                2,
                1,
            ),
            Question::new(
                "What is the correct way to establish a database connection in Java?",
                &[
                    "Database.connect(url, username, password);",
                    "DriverManager.getConnection(url, username, password);",
                    "Connection.establish(url, username, password);",
                    "JDBC.connect(url, username, password);",
                ],
                1,
                1,
            ),
        ],
    )
}
